//! The closed interval `[low, high]` stored in an `IntervalRegistry`, plus
//! the [`ClaimBound`] trait tying intervals to discrete integer bounds.
//!
//! Intervals are ordered by `(low, high)` inside the tree. Disjointness of
//! the stored set is the registry's job; the interval itself only knows the
//! pointwise predicates (`overlaps`, `touches`, `contains`).

use std::fmt;

use thiserror::Error;

/// A bound type for registry intervals: a discrete, totally ordered integer.
///
/// `forward`/`backward` are the checked successor and predecessor. They are
/// what lets touch detection near `MAX`/`MIN` avoid overflow.
pub trait ClaimBound: Copy + Ord + fmt::Debug {
    /// The next representable value, or `None` at the upper extreme.
    fn forward(self) -> Option<Self>;
    /// The previous representable value, or `None` at the lower extreme.
    fn backward(self) -> Option<Self>;
}

macro_rules! impl_claim_bound {
    ($($ty:ty),*) => {$(
        impl ClaimBound for $ty {
            #[inline]
            fn forward(self) -> Option<Self> {
                self.checked_add(1)
            }
            #[inline]
            fn backward(self) -> Option<Self> {
                self.checked_sub(1)
            }
        }
    )*};
}

impl_claim_bound!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// The error returned when an interval's bounds are reversed (`low > high`).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid interval: low {low:?} is greater than high {high:?}")]
pub struct InvalidInterval<T: fmt::Debug> {
    /// The rejected low bound
    pub low: T,
    /// The rejected high bound
    pub high: T,
}

/// A closed interval `[low, high]` with `low <= high`.
///
/// Single-point intervals (`low == high`) are valid; see [`Interval::point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct Interval<T> {
    /// Low bound, inclusive
    pub low: T,
    /// High bound, inclusive
    pub high: T,
}

impl<T: ClaimBound> Interval<T> {
    /// Create a new `Interval`
    ///
    /// # Panics
    ///
    /// This method panics when `low > high`
    #[inline]
    pub fn new(low: T, high: T) -> Self {
        assert!(low <= high, "invalid interval: low is greater than high");
        Self { low, high }
    }

    /// Create a new `Interval`, reporting reversed bounds as an error value.
    #[inline]
    pub fn try_new(low: T, high: T) -> Result<Self, InvalidInterval<T>> {
        if low <= high {
            Ok(Self { low, high })
        } else {
            Err(InvalidInterval { low, high })
        }
    }

    /// Create a single-point interval `[x, x]`.
    #[inline]
    pub fn point(x: T) -> Self {
        Self { low: x, high: x }
    }

    /// Check if self intersects the other interval in at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// Check if self and the other interval are adjacent with no gap,
    /// e.g. `[5, 10]` and `[11, 15]`.
    #[inline]
    pub fn touches(&self, other: &Self) -> bool {
        self.high.forward() == Some(other.low) || other.high.forward() == Some(self.low)
    }

    /// Check if self overlaps or touches the other interval, i.e. whether
    /// their union is one contiguous interval.
    #[inline]
    pub fn mergeable(&self, other: &Self) -> bool {
        self.overlaps(other) || self.touches(other)
    }

    /// Check if the other interval lies entirely within self.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.low <= other.low && other.high <= self.high
    }

    /// The interval widened by one unit on each side, saturating at the
    /// extremes of `T`. An interval overlaps the probe iff it is mergeable
    /// with the original, which turns touch detection into a plain overlap
    /// query against the tree.
    pub(crate) fn probe(&self) -> Self {
        Self {
            low: self.low.backward().unwrap_or(self.low),
            high: self.high.forward().unwrap_or(self.high),
        }
    }
}
