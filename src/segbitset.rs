use std::{fmt::Debug, ops::Index};

use bitvec::{
    bitbox,
    boxed::BitBox,
    order::{BitOrder, Lsb0},
    slice::BitSlice,
    store::BitStore,
};
use itertools::Itertools;

use crate::{
    IndexErr,
    node::{self, Node, ROOT, left, parent, right},
};

/// A fixed-size bitset which maintains a binary tree of OR-summaries over its bits.
///
/// The tree is stored implicitly in a flat bitmap of `1 + 4 * size` slots: the
/// root lives at slot 1 and node `x` has children `2x` and `2x + 1`. Every
/// internal node is set iff any leaf below it is set, which lets searches and
/// bulk operations skip all-zero regions entirely.
///
/// The size is chosen at construction and never changes.
///
/// # Examples
///
/// ```
/// use segbitset::SegBitset;
///
/// let mut bits = SegBitset::new(64);
/// bits.set(20, true).unwrap();
/// bits.set(41, true).unwrap();
///
/// assert!(bits.test(20).unwrap());
/// assert_eq!(bits.count(), 2);
/// assert_eq!(bits.first(), 20);
/// assert_eq!(bits.next(20), 41);
/// assert_eq!(bits.next(41), bits.size());
/// ```
pub struct SegBitset {
    tree: BitBox<u64, Lsb0>,
    size: usize,
}

static_assertions::const_assert_eq!(std::mem::size_of::<SegBitset>(), 24);

impl SegBitset {
    /// Creates an empty bitset over positions `0..size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero, or if `1 + 4 * size` overflows a `usize`.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "SegBitset requires a non-zero size");
        let Some(slots) = node::slots_for(size) else {
            panic!("SegBitset size {size} is too large: 1 + 4 * size overflows usize");
        };
        tracing::trace!(size, slots, "allocating segbitset");
        Self { tree: bitbox![u64, Lsb0; 0; slots], size }
    }

    /// Builds a bitset over `0..size` where position `pos` is set iff `f(pos)`
    /// returns true. `f` is called once per position in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use segbitset::SegBitset;
    ///
    /// let evens = SegBitset::from_fn(10, |pos| pos % 2 == 0);
    /// assert_eq!(evens.iter().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
    /// ```
    pub fn from_fn(size: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut out = Self::new(size);
        out.build(out.root(), &mut f);
        tracing::debug!(size, any = out.any(), "built segbitset");
        out
    }

    /// Builds a bitset with the same size and contents as a dense bitmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitvec::prelude::*;
    /// use segbitset::SegBitset;
    ///
    /// let dense = bitvec![0, 1, 0, 0, 1];
    /// let bits = SegBitset::from_bits(dense.as_bitslice());
    /// assert_eq!(bits.size(), 5);
    /// assert_eq!(bits.to_bits(), dense);
    /// ```
    pub fn from_bits<T: BitStore, O: BitOrder>(bits: &BitSlice<T, O>) -> Self {
        Self::from_fn(bits.len(), |pos| bits[pos])
    }

    /// Builds a bitset over `0..size` with exactly the given positions set.
    ///
    /// Returns [`IndexErr::OutOfRange`] if any position is `>= size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use segbitset::{IndexErr, SegBitset};
    ///
    /// let bits = SegBitset::from_positions(64, [1, 20, 31, 41]).unwrap();
    /// assert_eq!(bits.count(), 4);
    ///
    /// let err = SegBitset::from_positions(64, [64]).unwrap_err();
    /// assert_eq!(err, IndexErr::OutOfRange { pos: 64, size: 64 });
    /// ```
    pub fn from_positions(
        size: usize,
        positions: impl IntoIterator<Item = usize>,
    ) -> Result<Self, IndexErr> {
        let mut dense = bitbox![u64, Lsb0; 0; size];
        for pos in positions {
            if pos >= size {
                return Err(IndexErr::OutOfRange { pos, size });
            }
            dense.set(pos, true);
        }
        Ok(Self::from_bits(dense.as_bitslice()))
    }

    fn build(&mut self, node: Node, f: &mut impl FnMut(usize) -> bool) {
        if node.is_leaf() {
            self.tree.set(node.idx, f(node.lo));
            return;
        }
        let (l, r) = node.children();
        self.build(l, f);
        self.build(r, f);
        self.pushup(node.idx);
    }

    /// Returns the number of addressable positions.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of tree slots allocated for this bitset, `1 + 4 * size`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tree.len()
    }

    #[inline(always)]
    pub(crate) fn root(&self) -> Node {
        Node::root(self.size)
    }

    #[inline(always)]
    pub(crate) fn summary(&self, x: usize) -> bool {
        self.tree[x]
    }

    #[inline(always)]
    pub(crate) fn write(&mut self, x: usize, value: bool) {
        self.tree.set(x, value);
    }

    #[inline(always)]
    pub(crate) fn tree_mut(&mut self) -> &mut BitSlice<u64, Lsb0> {
        &mut self.tree
    }

    /// Recomputes the summary of `x` from its children.
    #[inline(always)]
    pub(crate) fn pushup(&mut self, x: usize) {
        let value = self.tree[left(x)] | self.tree[right(x)];
        self.tree.set(x, value);
    }

    /// Recomputes every summary from `x` up to the root.
    #[inline]
    pub(crate) fn propagate_up(&mut self, mut x: usize) {
        while x >= ROOT {
            self.pushup(x);
            x = parent(x);
        }
    }

    /// Returns the slot of the leaf covering `pos`, after checking that it is in range.
    #[inline]
    pub(crate) fn leaf(&self, pos: usize) -> Result<usize, IndexErr> {
        if pos >= self.size {
            return Err(IndexErr::OutOfRange { pos, size: self.size });
        }
        Ok(node::find_leaf(self.size, pos))
    }

    /// Writes a leaf and restores the summaries above it.
    #[inline]
    pub(crate) fn write_leaf(&mut self, leaf: usize, value: bool) {
        self.tree.set(leaf, value);
        self.propagate_up(parent(leaf));
    }

    /// Returns whether the bit at `pos` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use segbitset::{IndexErr, SegBitset};
    ///
    /// let bits = SegBitset::from_positions(8, [3]).unwrap();
    /// assert_eq!(bits.test(3), Ok(true));
    /// assert_eq!(bits.test(4), Ok(false));
    /// assert_eq!(bits.test(8), Err(IndexErr::OutOfRange { pos: 8, size: 8 }));
    /// ```
    #[inline]
    pub fn test(&self, pos: usize) -> Result<bool, IndexErr> {
        Ok(self.tree[self.leaf(pos)?])
    }

    /// Returns whether the bit at `pos` is set, or `None` if `pos` is out of range.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<bool> {
        self.test(pos).ok()
    }

    /// Sets the bit at `pos` to `value`.
    pub fn set(&mut self, pos: usize, value: bool) -> Result<(), IndexErr> {
        let leaf = self.leaf(pos)?;
        self.write_leaf(leaf, value);
        Ok(())
    }

    /// Clears the bit at `pos`.
    #[inline]
    pub fn reset(&mut self, pos: usize) -> Result<(), IndexErr> {
        self.set(pos, false)
    }

    /// Inverts the bit at `pos`.
    pub fn flip(&mut self, pos: usize) -> Result<(), IndexErr> {
        let leaf = self.leaf(pos)?;
        let value = !self.tree[leaf];
        self.write_leaf(leaf, value);
        Ok(())
    }

    /// Exports this bitset into a dense bitmap of length `size`.
    ///
    /// All-zero subtrees are skipped, so exporting a sparse bitset only visits
    /// the paths leading to set bits.
    pub fn to_bits(&self) -> BitBox<u64, Lsb0> {
        let mut dense = bitbox![u64, Lsb0; 0; self.size];
        self.export(self.root(), &mut dense);
        dense
    }

    /// Exports this bitset as a vector of `size` booleans.
    pub fn to_vec(&self) -> Vec<bool> {
        self.to_bits().iter().by_vals().collect()
    }

    fn export(&self, node: Node, dense: &mut BitSlice<u64, Lsb0>) {
        // the output starts zeroed, so an empty subtree needs no writes
        if !self.tree[node.idx] {
            return;
        }
        if node.is_leaf() {
            dense.set(node.lo, true);
            return;
        }
        let (l, r) = node.children();
        self.export(l, dense);
        self.export(r, dense);
    }
}

impl Clone for SegBitset {
    fn clone(&self) -> Self {
        Self { tree: self.tree.clone(), size: self.size }
    }

    /// Reuses the existing tree storage when both bitsets have the same size.
    fn clone_from(&mut self, source: &Self) {
        if self.size == source.size {
            self.tree.copy_from_bitslice(source.tree.as_bitslice());
        } else {
            *self = source.clone();
        }
    }
}

impl<T: BitStore, O: BitOrder> From<&BitSlice<T, O>> for SegBitset {
    #[inline]
    fn from(bits: &BitSlice<T, O>) -> Self {
        Self::from_bits(bits)
    }
}

impl From<&[bool]> for SegBitset {
    fn from(bits: &[bool]) -> Self {
        Self::from_fn(bits.len(), |pos| bits[pos])
    }
}

impl From<&SegBitset> for BitBox<u64, Lsb0> {
    #[inline]
    fn from(bits: &SegBitset) -> Self {
        bits.to_bits()
    }
}

impl Index<usize> for SegBitset {
    type Output = bool;

    /// # Panics
    ///
    /// Panics if `pos` is out of range.
    fn index(&self, pos: usize) -> &bool {
        match self.test(pos) {
            Ok(true) => &true,
            Ok(false) => &false,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Debug for SegBitset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = self.iter().take(16).collect_vec();
        f.debug_struct("SegBitset")
            .field("size", &self.size)
            .field("prefix", &prefix)
            .finish()
    }
}
