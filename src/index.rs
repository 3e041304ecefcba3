use std::fmt;
use std::hash::Hash;

/// The default arena index type.
pub type DefaultIx = u32;

/// An index type usable as a node reference in the arena.
///
/// # Safety
///
/// `new` and `index` must round-trip losslessly for every index the arena
/// can hold, and `max` must be the largest representable value (it doubles
/// as the sentinel for "no node").
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {$(
        unsafe impl IndexType for $ty {
            #[inline(always)]
            fn new(x: usize) -> Self {
                x as $ty
            }
            #[inline(always)]
            fn index(&self) -> usize {
                *self as usize
            }
            #[inline(always)]
            fn max() -> Self {
                <$ty>::MAX
            }
        }
    )*};
}

impl_index_type!(u16, u32, usize);

/// Node identifier in the registry's arena.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    #[inline]
    pub fn end() -> Self {
        NodeIndex(IndexType::max())
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}
