use crate::{node::Node, segbitset::SegBitset};

impl SegBitset {
    /// Returns the number of set bits.
    ///
    /// Empty subtrees are skipped, so this costs `O(1)` on an empty bitset and
    /// `O(size)` on a full one.
    pub fn count(&self) -> usize {
        self.count_node(self.root())
    }

    fn count_node(&self, node: Node) -> usize {
        if !self.summary(node.idx) {
            return 0;
        }
        if node.is_leaf() {
            return 1;
        }
        let (l, r) = node.children();
        self.count_node(l) + self.count_node(r)
    }

    /// Returns true if every bit is set.
    pub fn all(&self) -> bool {
        self.all_node(self.root())
    }

    fn all_node(&self, node: Node) -> bool {
        if !self.summary(node.idx) {
            return false;
        }
        if node.is_leaf() {
            return true;
        }
        let (l, r) = node.children();
        self.all_node(l) && self.all_node(r)
    }

    /// Returns true if any bit is set. `O(1)`.
    #[inline]
    pub fn any(&self) -> bool {
        self.summary(self.root().idx)
    }

    /// Returns true if no bit is set. `O(1)`.
    #[inline]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Sets every bit.
    pub fn set_all(&mut self) {
        // every slot, leaf or summary, ends up true
        self.tree_mut().fill(true);
    }

    /// Clears every bit, skipping subtrees which are already empty.
    pub fn reset_all(&mut self) {
        self.clear_node(self.root());
    }

    pub(crate) fn clear_node(&mut self, node: Node) {
        if !self.summary(node.idx) {
            return;
        }
        self.write(node.idx, false);
        if node.is_leaf() {
            return;
        }
        let (l, r) = node.children();
        self.clear_node(l);
        self.clear_node(r);
    }

    /// Inverts every bit.
    ///
    /// Unlike [`SegBitset::reset_all`] this can not skip anything: an empty
    /// subtree becomes a full one, so every leaf is visited.
    pub fn flip_all(&mut self) {
        self.flip_node(self.root());
    }

    fn flip_node(&mut self, node: Node) {
        if node.is_leaf() {
            let value = !self.summary(node.idx);
            self.write(node.idx, value);
            return;
        }
        let (l, r) = node.children();
        self.flip_node(l);
        self.flip_node(r);
        self.pushup(node.idx);
    }

    /// Returns a copy of this bitset with every bit inverted.
    ///
    /// # Examples
    ///
    /// ```
    /// use segbitset::SegBitset;
    ///
    /// let bits = SegBitset::from_positions(4, [0, 2]).unwrap();
    /// let inverted = bits.complement();
    /// assert_eq!(inverted.iter().collect::<Vec<_>>(), vec![1, 3]);
    /// assert_eq!(inverted.complement(), bits);
    /// ```
    pub fn complement(&self) -> Self {
        let mut out = self.clone();
        out.flip_all();
        out
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::proptest;

    use crate::{
        SegBitset,
        testutil::{BitsGen, assert_invariant, bits_strategy, mkbitset},
    };

    #[test]
    fn test_count_family() {
        let bits = mkbitset(64, [1, 20, 31, 41]);
        assert_eq!(bits.count(), 4);
        assert!(bits.any());
        assert!(!bits.none());
        assert!(!bits.all());

        let empty = SegBitset::new(100);
        assert_eq!(empty.count(), 0);
        assert!(!empty.any());
        assert!(empty.none());
        assert!(!empty.all());

        let full = SegBitset::from_fn(37, |_| true);
        assert_eq!(full.count(), 37);
        assert!(full.all());
    }

    #[test]
    fn test_set_all() {
        for size in [1, 2, 5, 64, 99] {
            let mut bits = mkbitset(size, [0]);
            bits.set_all();
            assert!(bits.all(), "size {size}");
            assert_eq!(bits.count(), size);
            assert_eq!(bits.first(), 0);
            assert_invariant(&bits);
            assert_eq!(bits, SegBitset::from_fn(size, |_| true));

            // point ops keep working on top of a filled tree
            bits.reset(size - 1).unwrap();
            assert_eq!(bits.count(), size - 1);
            assert!(!bits.all());
            assert_invariant(&bits);
        }
    }

    #[test]
    fn test_reset_all() {
        let mut bits = mkbitset(1000, [3, 500, 999]);
        bits.reset_all();
        assert!(bits.none());
        assert_eq!(bits.count(), 0);
        assert_eq!(bits.first(), 1000);
        assert_invariant(&bits);

        let mut bits = SegBitset::new(10);
        bits.set_all();
        bits.reset_all();
        assert!(bits.none());
        assert_eq!(bits, SegBitset::new(10));
        assert_invariant(&bits);
    }

    #[test]
    fn test_flip_all() {
        let mut bits = mkbitset(10, [0, 9]);
        bits.flip_all();
        assert_eq!(bits.iter().collect_vec(), (1..9).collect_vec());
        assert_invariant(&bits);

        // an empty bitset becomes a full one
        let mut bits = SegBitset::new(77);
        bits.flip_all();
        assert!(bits.all());
        assert_invariant(&bits);
    }

    #[test]
    fn test_complement_sparse() {
        let mut set_gen = BitsGen::new(0xDEAD_BEEF);
        let dense = set_gen.sparse(4096, 40);
        let bits = SegBitset::from_bits(dense.as_bitslice());
        let inverted = !&bits;
        assert_eq!(inverted.count(), 4096 - 40);
        assert_eq!(inverted.to_bits(), !dense);
        assert_invariant(&inverted);
    }

    proptest! {
        #[test]
        fn test_cardinality_proptest(dense in bits_strategy(1..600)) {
            let bits = SegBitset::from(dense.as_slice());
            let expected = dense.iter().filter(|&&b| b).count();
            assert_eq!(bits.count(), expected);
            assert_eq!(bits.any(), bits.count() > 0);
            assert_eq!(bits.none(), !bits.any());
            assert_eq!(bits.all(), bits.count() == bits.size());
        }

        #[test]
        fn test_complement_proptest(dense in bits_strategy(1..600)) {
            let bits = SegBitset::from(dense.as_slice());
            let inverted = bits.complement();
            assert_invariant(&inverted);
            let expected = dense.iter().map(|b| !b).collect_vec();
            assert_eq!(inverted.to_vec(), expected);
            assert_eq!(inverted.complement(), bits);
        }
    }
}
