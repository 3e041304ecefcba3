use std::collections::VecDeque;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::{ClaimBound, Interval, InvalidInterval};
use crate::iter::Iter;
use crate::node::{Color, Node};

/// A registry of disjoint closed intervals over a linear index space.
///
/// The stored intervals never overlap and never touch: any claim that would
/// violate this is merged into a single entry by [`claim`](Self::claim).
/// Between any two stored intervals lies at least one unclaimed unit.
///
/// Internally the registry is an augmented red-black tree backed by a `Vec`
/// arena, so overlap queries, merges, and reinsertions all run in
/// `O((k + 1) log n)` for `k` merged entries.
///
/// The registry does no locking of its own. Concurrent claimants must wrap
/// it in a mutex or a single-owner task so that the query-then-merge sequence
/// stays atomic; see the crate docs.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalRegistry<T, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<T, Ix>>,
    /// Root of the interval tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of stored intervals
    pub(crate) len: usize,
}

impl<T, Ix> IntervalRegistry<T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    /// Creates a new `IntervalRegistry` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        IntervalRegistry {
            nodes,
            root: Self::sentinel(),
            len: 0,
        }
    }

    /// Atomically test-and-register an interval.
    ///
    /// Every stored interval that overlaps or touches `interval` is removed
    /// and replaced, together with `interval` itself, by their single union
    /// entry. Returns `true` if the claim contributed at least one
    /// previously-unclaimed unit, `false` if the whole range was already
    /// covered by an earlier claim (in which case coverage is unchanged).
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes
    /// for its index
    ///
    /// # Example
    /// ```rust
    /// use disjoint_intervals::{Interval, IntervalRegistry};
    ///
    /// let mut registry = IntervalRegistry::new();
    /// assert!(registry.claim(Interval::new(0i64, 2)));
    /// assert!(registry.claim(Interval::new(5, 7)));
    /// assert!(registry.claim(Interval::new(10, 12)));
    /// // spans all three stored intervals, collapsing them into [0, 12]
    /// assert!(registry.claim(Interval::new(1, 11)));
    /// assert_eq!(registry.len(), 1);
    /// // fully covered now
    /// assert!(!registry.claim(Interval::new(0, 12)));
    /// ```
    #[inline]
    pub fn claim(&mut self, interval: Interval<T>) -> bool {
        // Widening by one unit turns "overlaps or touches" into a plain
        // overlap query against the tree.
        let probe = interval.probe();
        let matched = self.collect_overlaps(&probe);
        if matched.is_empty() {
            self.insert_interval(interval);
            return true;
        }
        let mut merged = interval;
        let mut fresh = true;
        for hit in matched {
            if hit.contains(&interval) {
                fresh = false;
            }
            merged.low = merged.low.min(hit.low);
            merged.high = merged.high.max(hit.high);
            let removed = self.remove_interval(&hit);
            debug_assert!(removed, "matched interval must be stored");
        }
        self.insert_interval(merged);
        fresh
    }

    /// [`claim`](Self::claim) from raw bounds, reporting `low > high` as an
    /// error value instead of panicking.
    ///
    /// # Example
    /// ```rust
    /// use disjoint_intervals::{IntervalRegistry, InvalidInterval};
    ///
    /// let mut registry = IntervalRegistry::new();
    /// assert_eq!(registry.try_claim(1i32, 3), Ok(true));
    /// assert_eq!(registry.try_claim(2, 3), Ok(false));
    /// assert_eq!(
    ///     registry.try_claim(3, 1),
    ///     Err(InvalidInterval { low: 3, high: 1 })
    /// );
    /// ```
    #[inline]
    pub fn try_claim(&mut self, low: T, high: T) -> Result<bool, InvalidInterval<T>> {
        Ok(self.claim(Interval::try_new(low, high)?))
    }

    /// Check if the given interval is already fully claimed.
    ///
    /// Because stored intervals are separated by at least one unclaimed
    /// unit, a fully-claimed range always lies within a single stored entry.
    ///
    /// # Example
    /// ```rust
    /// use disjoint_intervals::{Interval, IntervalRegistry};
    ///
    /// let mut registry = IntervalRegistry::new();
    /// registry.claim(Interval::new(0u32, 10));
    /// assert!(registry.covers(&Interval::new(3, 6)));
    /// assert!(!registry.covers(&Interval::new(8, 12)));
    /// ```
    #[inline]
    pub fn covers(&self, interval: &Interval<T>) -> bool {
        let node_idx = self.search(interval);
        self.node_ref(node_idx, Node::sentinel)
            .is_some_and(|node| node.interval().contains(interval))
    }

    /// Check if any stored interval intersects the given interval.
    ///
    /// # Example
    /// ```rust
    /// use disjoint_intervals::{Interval, IntervalRegistry};
    ///
    /// let mut registry = IntervalRegistry::new();
    /// registry.claim(Interval::new(1u32, 3));
    /// registry.claim(Interval::new(9, 11));
    /// assert!(registry.overlaps(&Interval::new(2, 5)));
    /// assert!(!registry.overlaps(&Interval::new(5, 7)));
    /// ```
    #[inline]
    pub fn overlaps(&self, interval: &Interval<T>) -> bool {
        let node_idx = self.search(interval);
        !self.node_ref(node_idx, Node::is_sentinel)
    }

    /// Reset the registry to the empty set.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.len = 0;
    }

    /// Get an iterator over the stored intervals in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, Ix> {
        Iter::new(self)
    }

    /// Return the number of stored intervals.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if nothing is claimed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> IntervalRegistry<T>
where
    T: ClaimBound,
{
    /// Create an empty `IntervalRegistry`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::new_sentinel()],
            root: Self::sentinel(),
            len: 0,
        }
    }
}

impl<T> Default for IntervalRegistry<T>
where
    T: ClaimBound,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, Ix> IntervalRegistry<T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<T, Ix> {
        Node {
            interval: None,
            max_index: None,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(interval: Interval<T>, index: NodeIndex<Ix>) -> Node<T, Ix> {
        Node {
            max_index: Some(index),
            interval: Some(interval),
            left: Some(Self::sentinel()),
            right: Some(Self::sentinel()),
            parent: Some(Self::sentinel()),
            color: Color::Red,
        }
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }
}

impl<T, Ix> IntervalRegistry<T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    /// Collect every stored interval overlapping the probe.
    ///
    /// The result is unordered because of breadth-first search to save
    /// stack size.
    fn collect_overlaps(&self, probe: &Interval<T>) -> Vec<Interval<T>> {
        let mut hits = Vec::new();
        if self.node_ref(self.root, Node::is_sentinel) {
            return hits;
        }
        let mut queue = VecDeque::new();
        queue.push_back(self.root);
        while let Some(p) = queue.pop_front() {
            let p_interval = self.node_ref(p, Node::interval);
            if p_interval.overlaps(probe) {
                hits.push(p_interval);
            }
            let p_left = self.node_ref(p, Node::left);
            let p_right = self.node_ref(p, Node::right);
            if self.subtree_max(p_left) >= Some(probe.low) {
                queue.push_back(p_left);
            }
            // every low in the right subtree is >= p's low, and the subtree
            // spans up to its max high bound
            if self
                .subtree_max(p_right)
                .is_some_and(|r_max| r_max >= probe.low && p_interval.low <= probe.high)
            {
                queue.push_back(p_right);
            }
        }
        hits
    }

    /// Search for one stored interval that overlaps the given interval.
    fn search(&self, interval: &Interval<T>) -> NodeIndex<Ix> {
        let mut x = self.root;
        while self
            .node_ref(x, Node::sentinel)
            .map(Node::interval)
            .is_some_and(|xi| !xi.overlaps(interval))
        {
            if self.subtree_max(self.node_ref(x, Node::left)) >= Some(interval.low) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        x
    }

    /// Search for the node with exactly the given interval
    fn search_exact(&self, interval: &Interval<T>) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            if self.node_ref(x, Node::interval) == *interval {
                return Some(x);
            }
            if self.subtree_max(x) < Some(interval.high) {
                return None;
            }
            if self.node_ref(x, Node::interval) > *interval {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        None
    }

    /// Insert an interval as a fresh tree node.
    fn insert_interval(&mut self, interval: Interval<T>) {
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(interval, node_idx));
        self.insert_inner(node_idx);
    }

    /// Remove an interval from the tree, returning whether it was stored.
    fn remove_interval(&mut self, interval: &Interval<T>) -> bool {
        if let Some(node_idx) = self.search_exact(interval) {
            self.remove_inner(node_idx);
            // Swap the node with the last node stored in the vector and
            // update indices
            let _removed = self.nodes.swap_remove(node_idx.index());
            let old = NodeIndex::<Ix>::new(self.nodes.len());
            self.update_idx(old, node_idx);
            return true;
        }
        false
    }

    /// Insert a node into the tree.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let z_interval = self.node_ref(z, Node::interval);
        let mut y = Self::sentinel();
        let mut x = self.root;

        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            // claim removes everything mergeable before reinserting, so an
            // exact duplicate can never reach this point
            debug_assert!(self.node_ref(x, Node::interval) != z_interval);
            if z_interval < self.node_ref(x, Node::interval) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
        } else {
            if z_interval < self.node_ref(y, Node::interval) {
                self.node_mut(y, Node::set_left(z));
            } else {
                self.node_mut(y, Node::set_right(z));
            }
            self.update_max_bottom_up(y);
        }
        self.node_mut(z, Node::set_color(Color::Red));

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
    }

    /// Remove a node from the tree.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = z;
        let mut y_orig_color = self.node_ref(y, Node::color);
        let x;
        if self.left_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::right);
            self.transplant(z, x);
            self.update_max_bottom_up(self.node_ref(z, Node::parent));
        } else if self.right_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
            self.update_max_bottom_up(self.node_ref(z, Node::parent));
        } else {
            y = self.tree_minimum(self.node_ref(z, Node::right));
            let mut p = y;
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                p = self.node_ref(y, Node::parent);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));

            self.update_max_bottom_up(p);
        }

        if matches!(y_orig_color, Color::Black) {
            self.remove_fixup(x);
        }

        self.len = self.len.wrapping_sub(1);
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));

        self.rotate_update_max(x, y);
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));

        self.rotate_update_max(x, y);
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Update the max bound after a rotation.
    fn rotate_update_max(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_max_index(self.node_ref(x, Node::max_index)));
        self.recalculate_max(x);
    }

    /// Update the max bound towards the root
    fn update_max_bottom_up(&mut self, x: NodeIndex<Ix>) {
        let mut p = x;
        while !self.node_ref(p, Node::is_sentinel) {
            self.recalculate_max(p);
            p = self.node_ref(p, Node::parent);
        }
    }

    /// Recalculate the max bound from the left and right children
    fn recalculate_max(&mut self, x: NodeIndex<Ix>) {
        self.node_mut(x, Node::set_max_index(x));
        let x_left = self.node_ref(x, Node::left);
        let x_right = self.node_ref(x, Node::right);
        if self.subtree_max(x_left) > self.subtree_max(x) {
            self.node_mut(
                x,
                Node::set_max_index(self.node_ref(x_left, Node::max_index)),
            );
        }
        if self.subtree_max(x_right) > self.subtree_max(x) {
            self.node_mut(
                x,
                Node::set_max_index(self.node_ref(x_right, Node::max_index)),
            );
        }
    }

    /// Find the node with the minimum interval.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// Update node indices after a `swap_remove`
    ///
    /// This method has a time complexity of `O(logn)`, as we need to
    /// update the max index from bottom to top.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.parent_ref(new, Node::is_sentinel) {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            self.left_mut(new, Node::set_parent(new));
            self.right_mut(new, Node::set_parent(new));

            let mut p = new;
            while !self.node_ref(p, Node::is_sentinel) {
                if self.node_ref(p, Node::max_index) == old {
                    self.node_mut(p, Node::set_max_index(new));
                }
                p = self.node_ref(p, Node::parent);
            }
        }
    }
}

// Convenient methods for referencing or mutating the current/parent/left/right node
impl<'a, T, Ix> IntervalRegistry<T, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<T, Ix> IntervalRegistry<T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    /// The max high bound in the subtree rooted at `node`, `None` for the
    /// sentinel.
    pub(crate) fn subtree_max(&self, node: NodeIndex<Ix>) -> Option<T> {
        let max_index = self.nodes[node.index()].max_index?.index();
        self.nodes[max_index].interval.map(|i| i.high)
    }
}
