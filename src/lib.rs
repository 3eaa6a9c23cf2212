//! `SegBitset` is a fixed-size bitset which stores an implicit binary tree of
//! OR-summaries on top of its bits, similar to a segment tree.
//!
//! ## Key Features:
//!
//! - **Sparse Enumeration**: Every internal node records whether any bit below it is set. Finding
//!   the first or next set bit, or visiting every set bit, only descends into subtrees containing
//!   set bits, so the cost follows the number of set bits rather than the size of the universe.
//!
//! - **Pruned Bulk Operations**: `&=`, `|=`, `^=`, `count`, `all` and `reset_all` skip entire
//!   all-zero subtrees. Point operations cost `O(log N)`.
//!
//! - **Dense Interchange**: A `SegBitset` is built from, and exported back to, a dense
//!   [`bitvec`] bitmap (or a slice of `bool`).

use thiserror::Error;

mod bit_mut;
mod bulk;
mod iter;
mod node;
mod ops;
mod segbitset;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use bit_mut::BitMut;
pub use iter::Iter;
pub use segbitset::SegBitset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexErr {
    #[error("position {pos} is out of range for a bitset of size {size}")]
    OutOfRange { pos: usize, size: usize },
}
