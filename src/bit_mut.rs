use std::{fmt::Debug, ops::Deref};

use crate::{IndexErr, segbitset::SegBitset};

/// A mutable handle to a single bit of a [`SegBitset`].
///
/// The position is checked and located once when the handle is created, so
/// repeated reads and writes through the handle skip the root-to-leaf walk.
/// Every write still restores the summaries above the bit before returning.
///
/// # Examples
///
/// ```
/// use segbitset::SegBitset;
///
/// let mut bits = SegBitset::new(16);
/// let mut bit = bits.bit_mut(5).unwrap();
/// assert!(!*bit);
///
/// bit.set(true);
/// assert!(bit.get());
///
/// // flips the bit and returns what it was before
/// assert!(bit.test_and_flip());
/// assert!(!bit.get());
///
/// bit.flip();
/// assert_eq!(bits.first(), 5);
/// ```
pub struct BitMut<'a> {
    bits: &'a mut SegBitset,
    pos: usize,
    leaf: usize,
}

impl SegBitset {
    /// Returns a mutable handle to the bit at `pos`.
    pub fn bit_mut(&mut self, pos: usize) -> Result<BitMut<'_>, IndexErr> {
        let leaf = self.leaf(pos)?;
        Ok(BitMut { bits: self, pos, leaf })
    }
}

impl BitMut<'_> {
    /// The position this handle refers to.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.bits.summary(self.leaf)
    }

    #[inline]
    pub fn set(&mut self, value: bool) {
        self.bits.write_leaf(self.leaf, value);
    }

    /// Copies the value of another bit into this one.
    #[inline]
    pub fn assign(&mut self, other: &BitMut<'_>) {
        self.set(other.get());
    }

    #[inline]
    pub fn flip(&mut self) {
        self.set(!self.get());
    }

    /// Flips the bit and returns its previous value.
    #[inline]
    pub fn test_and_flip(&mut self) -> bool {
        let prev = self.get();
        self.set(!prev);
        prev
    }
}

impl Deref for BitMut<'_> {
    type Target = bool;

    fn deref(&self) -> &bool {
        if self.get() { &true } else { &false }
    }
}

impl From<BitMut<'_>> for bool {
    #[inline]
    fn from(bit: BitMut<'_>) -> Self {
        bit.get()
    }
}

impl Debug for BitMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitMut")
            .field("pos", &self.pos)
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{
        SegBitset,
        testutil::{assert_invariant, mkbitset},
    };

    #[test]
    fn test_bit_mut() {
        let mut bits = SegBitset::new(100);
        {
            let mut bit = bits.bit_mut(42).unwrap();
            assert_eq!(bit.position(), 42);
            assert!(!bit.get());
            bit.set(true);
            assert!(*bit);
            bit.set(true);
            assert!(bit.get());
        }
        assert_eq!(bits.iter().collect_vec(), vec![42]);
        assert_invariant(&bits);

        {
            let mut bit = bits.bit_mut(42).unwrap();
            bit.flip();
            assert!(!bool::from(bit));
        }
        assert!(bits.none());
        assert_invariant(&bits);
    }

    #[test]
    fn test_test_and_flip() {
        let mut bits = mkbitset(10, [3]);
        {
            let mut bit = bits.bit_mut(3).unwrap();
            assert!(bit.test_and_flip());
            assert!(!bit.test_and_flip());
            assert!(bit.test_and_flip());
            assert!(!bit.get());
        }
        assert_eq!(bits.count(), 0);
        assert_invariant(&bits);
    }

    #[test]
    fn test_assign_from_other_handle() {
        let mut src = mkbitset(64, [7]);
        let mut dst = SegBitset::new(64);

        {
            let from = src.bit_mut(7).unwrap();
            let mut to = dst.bit_mut(9).unwrap();
            to.assign(&from);
            assert!(to.get());
        }
        assert_eq!(dst.iter().collect_vec(), vec![9]);
        assert_invariant(&dst);

        {
            let from = src.bit_mut(8).unwrap();
            let mut to = dst.bit_mut(9).unwrap();
            to.assign(&from);
        }
        assert!(dst.none());
        assert_invariant(&dst);
    }

    #[test]
    fn test_debug() {
        let mut bits = mkbitset(4, [1]);
        let bit = bits.bit_mut(1).unwrap();
        assert_eq!(format!("{bit:?}"), "BitMut { pos: 1, value: true }");
    }
}
