use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::index::NodeIndex;
use crate::node::{Color, Node};

use super::*;

struct ClaimGenerator {
    rng: StdRng,
    limit: i64,
}

impl ClaimGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i64 = 1000;
        Self {
            rng: SeedableRng::from_seed(seed),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> Interval<i64> {
        let low = self.rng.gen_range(0..self.limit);
        let high = self.rng.gen_range(low..self.limit);
        Interval::new(low, high)
    }

    fn next_with_span(&mut self, span: i64) -> Interval<i64> {
        let low = self.rng.gen_range(0..self.limit);
        let high = self.rng.gen_range(low..=(self.limit - 1).min(low + span));
        Interval::new(low, high)
    }
}

/// A naive reference implementation over a sorted `Vec`: same claim
/// contract, same touch-merges policy.
#[derive(Default)]
struct NaiveCoverage {
    spans: Vec<(i64, i64)>,
}

impl NaiveCoverage {
    fn claim(&mut self, interval: Interval<i64>) -> bool {
        let covered = self
            .spans
            .iter()
            .any(|&(l, h)| l <= interval.low && interval.high <= h);
        let (mut low, mut high) = (interval.low, interval.high);
        self.spans.retain(|&(l, h)| {
            if l <= high.saturating_add(1) && low.saturating_sub(1) <= h {
                low = low.min(l);
                high = high.max(h);
                false
            } else {
                true
            }
        });
        let pos = self.spans.partition_point(|&(l, _)| l < low);
        self.spans.insert(pos, (low, high));
        !covered
    }
}

impl IntervalRegistry<i64> {
    /// No two stored intervals overlap or touch.
    fn check_disjoint(&self) {
        let stored: Vec<_> = self.iter().collect();
        for pair in stored.windows(2) {
            assert!(
                pair[0].high.saturating_add(1) < pair[1].low,
                "stored intervals must be separated by an unclaimed unit: {pair:?}"
            );
        }
    }

    fn check_max(&self) {
        let _ignore = self.check_max_inner(self.root);
    }

    fn check_max_inner(&self, x: NodeIndex<u32>) -> i64 {
        if self.node_ref(x, Node::is_sentinel) {
            return i64::MIN;
        }
        let l_max = self.check_max_inner(self.node_ref(x, Node::left));
        let r_max = self.check_max_inner(self.node_ref(x, Node::right));
        let max = self.node_ref(x, |x| x.interval().high.max(l_max).max(r_max));
        assert_eq!(self.subtree_max(x), Some(max));
        max
    }

    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (NIL) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves
    ///    contain the same number of black nodes.
    fn check_rb_properties(&self) {
        assert!(matches!(
            self.node_ref(self.root, Node::color),
            Color::Black
        ));
        self.check_children_color(self.root);
        self.check_black_height(self.root);
    }

    fn check_children_color(&self, x: NodeIndex<u32>) {
        if self.node_ref(x, Node::is_sentinel) {
            return;
        }
        self.check_children_color(self.node_ref(x, Node::left));
        self.check_children_color(self.node_ref(x, Node::right));
        if self.node_ref(x, Node::is_red) {
            assert!(matches!(self.left_ref(x, Node::color), Color::Black));
            assert!(matches!(self.right_ref(x, Node::color), Color::Black));
        }
    }

    fn check_black_height(&self, x: NodeIndex<u32>) -> usize {
        if self.node_ref(x, Node::is_sentinel) {
            return 0;
        }
        let lefth = self.check_black_height(self.node_ref(x, Node::left));
        let righth = self.check_black_height(self.node_ref(x, Node::right));
        assert_eq!(lefth, righth);
        if self.node_ref(x, Node::is_black) {
            return lefth + 1;
        }
        lefth
    }
}

fn with_registry_and_generator(test_fn: impl Fn(IntervalRegistry<i64>, ClaimGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = ClaimGenerator::new(seed);
        let registry = IntervalRegistry::new();
        test_fn(registry, gen);
    }
}

#[test]
fn first_claim_on_empty_registry() {
    let mut registry = IntervalRegistry::new();
    registry.clear();
    assert!(registry.claim(Interval::point(0i64)));
    assert_eq!(registry.iter().collect::<Vec<_>>(), vec![Interval::point(0)]);
}

#[test]
fn touching_claims_merge_into_one() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::new(5i64, 10)));
    assert!(registry.claim(Interval::new(11, 15)));
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![Interval::new(5, 15)]
    );
}

#[test]
fn claim_spanning_multiple_entries_merges_all() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::new(0i64, 2)));
    assert!(registry.claim(Interval::new(5, 7)));
    assert!(registry.claim(Interval::new(10, 12)));
    assert!(registry.claim(Interval::new(1, 11)));
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![Interval::new(0, 12)]
    );
}

#[test]
fn claim_inside_existing_coverage_is_noop() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::new(0i64, 10)));
    assert!(!registry.claim(Interval::new(3, 6)));
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![Interval::new(0, 10)]
    );
}

#[test]
fn exact_reclaim_reports_no_new_coverage() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::new(4i64, 8)));
    assert!(!registry.claim(Interval::new(4, 8)));
    assert!(!registry.claim(Interval::new(4, 8)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn disjoint_claims_stay_separate() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::new(0i64, 5)));
    assert!(registry.claim(Interval::new(20, 25)));
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![Interval::new(0, 5), Interval::new(20, 25)]
    );
}

#[test]
fn partial_overlap_extends_coverage() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::new(0i64, 5)));
    assert!(registry.claim(Interval::new(3, 9)));
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![Interval::new(0, 9)]
    );
}

#[test]
fn point_claims_merge_like_any_interval() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::point(7i64)));
    assert!(registry.claim(Interval::point(8)));
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![Interval::new(7, 8)]
    );
    assert!(!registry.claim(Interval::point(7)));
}

#[test]
fn claims_at_numeric_extremes_do_not_overflow() {
    let mut registry = IntervalRegistry::new();
    assert!(registry.claim(Interval::point(u8::MAX)));
    assert!(registry.claim(Interval::point(u8::MAX - 1)));
    assert!(registry.claim(Interval::point(u8::MIN)));
    assert!(registry.claim(Interval::new(1u8, 2)));
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![Interval::new(0, 2), Interval::new(254, 255)]
    );
}

#[test]
fn clear_resets_to_empty() {
    let mut registry = IntervalRegistry::new();
    registry.claim(Interval::new(1i64, 3));
    registry.claim(Interval::new(6, 7));
    assert_eq!(registry.len(), 2);
    registry.clear();
    assert_eq!(registry.len(), 0);
    assert!(registry.is_empty());
    assert_eq!(registry.nodes.len(), 1);
    assert!(registry.nodes[0].is_sentinel());
    assert!(registry.claim(Interval::new(1, 3)));
}

#[test]
fn try_claim_rejects_reversed_bounds() {
    let mut registry = IntervalRegistry::new();
    assert_eq!(
        registry.try_claim(3i64, 1),
        Err(InvalidInterval { low: 3, high: 1 })
    );
    assert!(registry.is_empty());
    assert_eq!(registry.try_claim(1, 3), Ok(true));
    assert_eq!(registry.try_claim(2, 2), Ok(false));
}

#[test]
fn covers_and_overlaps_probe_stored_state() {
    let mut registry = IntervalRegistry::new();
    registry.claim(Interval::new(0i64, 10));
    registry.claim(Interval::new(20, 25));
    assert!(registry.covers(&Interval::new(3, 6)));
    assert!(registry.covers(&Interval::new(0, 10)));
    assert!(!registry.covers(&Interval::new(8, 22)));
    assert!(registry.overlaps(&Interval::new(8, 22)));
    assert!(!registry.overlaps(&Interval::new(12, 18)));
    assert!(!registry.covers(&Interval::new(12, 18)));
}

#[test]
fn random_claims_match_naive_model() {
    with_registry_and_generator(|mut registry, mut gen| {
        let mut model = NaiveCoverage::default();
        for _ in 0..2000 {
            let interval = gen.next_with_span(20);
            assert_eq!(registry.claim(interval), model.claim(interval));
            let stored: Vec<_> = registry.iter().map(|i| (i.low, i.high)).collect();
            assert_eq!(stored, model.spans);
        }
        registry.check_disjoint();
    });
}

#[test]
fn coverage_is_monotone_under_random_claims() {
    with_registry_and_generator(|mut registry, mut gen| {
        let mut claimed = Vec::new();
        for _ in 0..500 {
            let interval = gen.next();
            let fresh = registry.claim(interval);
            if claimed.is_empty() {
                assert!(fresh);
            }
            claimed.push(interval);
            for earlier in &claimed {
                assert!(registry.covers(earlier));
            }
        }
    });
}

#[test]
fn tree_invariants_hold_under_random_claims() {
    with_registry_and_generator(|mut registry, mut gen| {
        for step in 1..=2000 {
            let _fresh = registry.claim(gen.next_with_span(5));
            if step % 100 == 0 {
                registry.check_rb_properties();
                registry.check_max();
                registry.check_disjoint();
            }
        }
    });
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip_preserves_coverage() {
    let mut registry = IntervalRegistry::<i64>::new();
    registry.claim(Interval::new(1, 5));
    registry.claim(Interval::new(10, 12));
    registry.claim(Interval::new(40, 41));

    let serialized = serde_json::to_string(&registry).unwrap();
    let mut deserialized: IntervalRegistry<i64> = serde_json::from_str(&serialized).unwrap();

    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        deserialized.iter().collect::<Vec<_>>()
    );
    // the deserialized registry keeps working
    assert!(!deserialized.claim(Interval::new(10, 12)));
    assert!(deserialized.claim(Interval::new(6, 9)));
    assert_eq!(
        deserialized.iter().next(),
        Some(Interval::new(1, 12))
    );
}
