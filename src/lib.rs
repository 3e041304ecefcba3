//! `disjoint-intervals` maintains a set of non-overlapping closed integer
//! intervals and lets callers atomically test-and-register a new range with
//! [`IntervalRegistry::claim`], merging it with every stored interval it
//! overlaps or touches.
//!
//! The registry is the coordination payload for partitioning a shared linear
//! index space among workers: each worker claims the sub-range it is about to
//! process, and a `false` return tells it the whole range was already claimed
//! by somebody else. The registry itself does no locking; concurrent callers
//! must serialize access externally (see `demos/worker_claims.rs`).
//!
//! Stored intervals live in an augmented red-black tree. The tree uses a
//! `Vec` as a node arena and indices instead of pointers for the parent-child
//! references, so the registry is `Send` and `Unpin` and keeps a fixed memory
//! location during asynchronous operations.
//!
//! # Example
//!
//! ```rust
//! use disjoint_intervals::{Interval, IntervalRegistry};
//!
//! let mut registry = IntervalRegistry::new();
//! assert!(registry.claim(Interval::new(5u32, 10)));
//! // [11, 15] touches [5, 10], so the two merge into [5, 15]
//! assert!(registry.claim(Interval::new(11, 15)));
//! // [6, 14] is already covered
//! assert!(!registry.claim(Interval::new(6, 14)));
//! assert_eq!(registry.iter().collect::<Vec<_>>(), vec![Interval::new(5, 15)]);
//! ```

mod index;
mod interval;
mod iter;
mod node;
mod registry;

#[cfg(test)]
mod tests;

pub use index::{DefaultIx, IndexType, NodeIndex};
pub use interval::{ClaimBound, Interval, InvalidInterval};
pub use iter::Iter;
pub use registry::IntervalRegistry;
