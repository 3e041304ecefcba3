use crate::index::{IndexType, NodeIndex};
use crate::interval::{ClaimBound, Interval};
use crate::node::Node;
use crate::registry::IntervalRegistry;

/// Pushes a link of nodes on the left to stack.
fn left_link<T, Ix>(
    registry: &IntervalRegistry<T, Ix>,
    mut x: NodeIndex<Ix>,
) -> Vec<NodeIndex<Ix>>
where
    T: ClaimBound,
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !registry.node_ref(x, Node::is_sentinel) {
        nodes.push(x);
        x = registry.node_ref(x, Node::left);
    }
    nodes
}

/// An in-order iterator over the stored intervals of an `IntervalRegistry`.
///
/// Intervals are yielded by value (they are `Copy`), in ascending order.
#[derive(Debug)]
pub struct Iter<'a, T, Ix> {
    /// Reference to the registry
    registry: &'a IntervalRegistry<T, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, T, Ix> Iter<'a, T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    pub(crate) fn new(registry: &'a IntervalRegistry<T, Ix>) -> Self {
        Iter {
            registry,
            stack: left_link(registry, registry.root),
        }
    }
}

impl<T, Ix> Iterator for Iter<'_, T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    type Item = Interval<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack.extend(left_link(
            self.registry,
            self.registry.node_ref(x, Node::right),
        ));
        Some(self.registry.node_ref(x, Node::interval))
    }
}

impl<'a, T, Ix> IntoIterator for &'a IntervalRegistry<T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    type Item = Interval<T>;
    type IntoIter = Iter<'a, T, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
