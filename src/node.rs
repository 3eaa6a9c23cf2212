/// Index of the root node in the tree storage. Slot 0 is unused.
pub(crate) const ROOT: usize = 1;

/// Number of storage slots needed for a tree over `size` positions.
///
/// Splitting a range which is not a power of two at its midpoint produces node
/// indices beyond `2 * size`; `4 * size` is always enough. Returns `None` if
/// the slot count does not fit in a `usize`.
#[inline]
pub(crate) const fn slots_for(size: usize) -> Option<usize> {
    match size.checked_mul(4) {
        Some(n) => n.checked_add(1),
        None => None,
    }
}

#[inline(always)]
pub(crate) const fn left(x: usize) -> usize {
    x << 1
}

#[inline(always)]
pub(crate) const fn right(x: usize) -> usize {
    (x << 1) | 1
}

#[inline(always)]
pub(crate) const fn parent(x: usize) -> usize {
    x >> 1
}

/// A tree node along with the inclusive range of positions it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub idx: usize,
    pub lo: usize,
    pub hi: usize,
}

impl Node {
    #[inline]
    pub fn root(size: usize) -> Self {
        debug_assert!(size > 0, "a tree needs at least one position");
        Self { idx: ROOT, lo: 0, hi: size - 1 }
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    #[inline(always)]
    pub fn mid(&self) -> usize {
        self.lo + (self.hi - self.lo) / 2
    }

    /// Splits this node into its left and right children. Must not be called on a leaf.
    #[inline]
    pub fn children(&self) -> (Node, Node) {
        debug_assert!(!self.is_leaf(), "leaves have no children");
        let mid = self.mid();
        (
            Node { idx: left(self.idx), lo: self.lo, hi: mid },
            Node { idx: right(self.idx), lo: mid + 1, hi: self.hi },
        )
    }
}

/// Walks from the root to the leaf covering `pos` and returns the leaf's slot.
/// `pos` must be less than `size`.
#[inline]
pub(crate) fn find_leaf(size: usize, pos: usize) -> usize {
    debug_assert!(pos < size);
    let (mut x, mut lo, mut hi) = (ROOT, 0, size - 1);
    while lo != hi {
        let mid = lo + (hi - lo) / 2;
        if pos <= mid {
            x = left(x);
            hi = mid;
        } else {
            x = right(x);
            lo = mid + 1;
        }
    }
    x
}
