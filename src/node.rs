use crate::index::{IndexType, NodeIndex};
use crate::interval::{ClaimBound, Interval};

/// Node of the interval tree. Index 0 of the arena is the shared sentinel,
/// recognizable by `interval == None`.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<T, Ix> {
    /// Left child
    pub left: Option<NodeIndex<Ix>>,
    /// Right child
    pub right: Option<NodeIndex<Ix>>,
    /// Parent
    pub parent: Option<NodeIndex<Ix>>,
    /// Color of the node
    pub color: Color,

    /// Interval of the node, `None` for the sentinel
    pub interval: Option<Interval<T>>,
    /// Index of the node holding the max high bound of this subtree
    pub max_index: Option<NodeIndex<Ix>>,
}

impl<T, Ix> Node<T, Ix>
where
    T: ClaimBound,
    Ix: IndexType,
{
    pub fn interval(&self) -> Interval<T> {
        self.interval.unwrap()
    }
}

// Convenient getter/setter methods
impl<T, Ix> Node<T, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn max_index(&self) -> NodeIndex<Ix> {
        self.max_index.unwrap()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left.unwrap()
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right.unwrap()
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent.unwrap()
    }

    pub fn is_sentinel(&self) -> bool {
        self.interval.is_none()
    }

    pub fn sentinel(&self) -> Option<&Self> {
        self.interval.is_some().then_some(self)
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            node.color = color;
        }
    }

    pub fn set_max_index(max_index: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            let _ignore = node.max_index.replace(max_index);
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            let _ignore = node.left.replace(left);
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            let _ignore = node.right.replace(right);
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            let _ignore = node.parent.replace(parent);
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
