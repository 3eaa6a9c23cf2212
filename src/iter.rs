use std::{convert::Infallible, iter::FusedIterator, ops::ControlFlow};

use crate::{node::Node, segbitset::SegBitset};

impl SegBitset {
    /// Visits every set position `>= start` in ascending order, threading an
    /// accumulator through `f` until it breaks.
    ///
    /// Subtrees are entered only if their summary is set and their range
    /// reaches `start`; everything else is skipped without descending.
    fn try_fold_from<Acc, B, F>(&self, start: usize, init: Acc, mut f: F) -> ControlFlow<B, Acc>
    where
        F: FnMut(Acc, usize) -> ControlFlow<B, Acc>,
    {
        self.try_fold_node(self.root(), start, init, &mut f)
    }

    fn try_fold_node<Acc, B, F>(
        &self,
        node: Node,
        start: usize,
        acc: Acc,
        f: &mut F,
    ) -> ControlFlow<B, Acc>
    where
        F: FnMut(Acc, usize) -> ControlFlow<B, Acc>,
    {
        if !self.summary(node.idx) || node.hi < start {
            return ControlFlow::Continue(acc);
        }
        if node.is_leaf() {
            return f(acc, node.lo);
        }
        let (l, r) = node.children();
        let acc = self.try_fold_node(l, start, acc, f)?;
        self.try_fold_node(r, start, acc, f)
    }

    fn fold_from<Acc, F>(&self, start: usize, init: Acc, mut f: F) -> Acc
    where
        F: FnMut(Acc, usize) -> Acc,
    {
        let flow = self.try_fold_from(start, init, |acc, pos| {
            ControlFlow::<Infallible, Acc>::Continue(f(acc, pos))
        });
        match flow {
            ControlFlow::Continue(acc) => acc,
            ControlFlow::Break(never) => match never {},
        }
    }

    /// Returns the lowest set position `>= start`, if any.
    fn find_from(&self, start: usize) -> Option<usize> {
        match self.try_fold_from(start, (), |(), pos| ControlFlow::Break(pos)) {
            ControlFlow::Break(pos) => Some(pos),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Returns the lowest set position, or [`SegBitset::size`] if no bit is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use segbitset::SegBitset;
    ///
    /// let bits = SegBitset::from_positions(64, [1, 20, 31, 41]).unwrap();
    ///
    /// let mut found = vec![];
    /// let mut pos = bits.first();
    /// while pos != bits.size() {
    ///     found.push(pos);
    ///     pos = bits.next(pos);
    /// }
    /// assert_eq!(found, vec![1, 20, 31, 41]);
    ///
    /// assert_eq!(SegBitset::new(64).first(), 64);
    /// ```
    #[inline]
    pub fn first(&self) -> usize {
        self.find_from(0).unwrap_or(self.size())
    }

    /// Returns the lowest set position strictly greater than `pos`, or
    /// [`SegBitset::size`] if there is none.
    ///
    /// Every call searches from the root. To visit all set positions prefer
    /// [`SegBitset::for_each`] or [`SegBitset::iter`].
    pub fn next(&self, pos: usize) -> usize {
        match pos.checked_add(1) {
            Some(start) if start < self.size() => self.find_from(start).unwrap_or(self.size()),
            _ => self.size(),
        }
    }

    /// Calls `f` with every set position in ascending order, in a single pass
    /// over the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use segbitset::SegBitset;
    ///
    /// let bits = SegBitset::from_positions(100, [7, 3, 99]).unwrap();
    /// let mut found = vec![];
    /// bits.for_each(|pos| found.push(pos));
    /// assert_eq!(found, vec![3, 7, 99]);
    /// ```
    pub fn for_each(&self, mut f: impl FnMut(usize)) {
        self.fold_from(0, (), |(), pos| f(pos));
    }

    /// Like [`SegBitset::for_each`], but stops as soon as `f` returns
    /// [`ControlFlow::Break`] and hands back the break value.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::ControlFlow;
    /// use segbitset::SegBitset;
    ///
    /// let bits = SegBitset::from_positions(100, [3, 7, 50, 99]).unwrap();
    /// let above_five = bits.try_for_each(|pos| {
    ///     if pos > 5 { ControlFlow::Break(pos) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(above_five, ControlFlow::Break(7));
    /// ```
    pub fn try_for_each<B>(&self, mut f: impl FnMut(usize) -> ControlFlow<B>) -> ControlFlow<B> {
        self.try_fold_from(0, (), |(), pos| f(pos))
    }

    /// Returns an iterator over the set positions in ascending order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter { bits: self, cursor: 0 }
    }
}

/// An iterator over the set positions of a [`SegBitset`], in ascending order.
///
/// Each call to `next` searches from the root of the tree. Consuming
/// adaptors built on `fold` (`count`, `sum`, `for_each`, `last`, ...)
/// instead visit the remaining positions in a single pass.
#[derive(Clone, Debug)]
#[must_use]
pub struct Iter<'a> {
    bits: &'a SegBitset,
    cursor: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.bits.size() {
            return None;
        }
        match self.bits.find_from(self.cursor) {
            Some(pos) => {
                self.cursor = pos + 1;
                Some(pos)
            }
            None => {
                self.cursor = self.bits.size();
                None
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.bits.size().saturating_sub(self.cursor)))
    }

    fn fold<Acc, F>(self, init: Acc, f: F) -> Acc
    where
        F: FnMut(Acc, Self::Item) -> Acc,
    {
        if self.cursor >= self.bits.size() {
            return init;
        }
        self.bits.fold_from(self.cursor, init, f)
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a SegBitset {
    type Item = usize;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
