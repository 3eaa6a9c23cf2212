use std::ops::Range;

use bitvec::{bitbox, boxed::BitBox, order::Lsb0};
use itertools::Itertools;
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
};
use rand::{SeedableRng, seq::index};

use crate::{SegBitset, node::Node};

/// Builds a dense bitmap of length `size` with the given positions set.
pub fn mkbits(size: usize, positions: impl IntoIterator<Item = usize>) -> BitBox<u64, Lsb0> {
    let mut bits = bitbox![u64, Lsb0; 0; size];
    for pos in positions {
        bits.set(pos, true);
    }
    bits
}

/// Builds a `SegBitset` of the given size with the given positions set.
pub fn mkbitset(size: usize, positions: impl IntoIterator<Item = usize>) -> SegBitset {
    SegBitset::from_positions(size, positions).unwrap()
}

/// Asserts that every internal node of `bits` is the OR of its children.
#[track_caller]
pub fn assert_invariant(bits: &SegBitset) {
    fn check(bits: &SegBitset, node: Node) {
        if node.is_leaf() {
            return;
        }
        let (l, r) = node.children();
        assert_eq!(
            bits.summary(node.idx),
            bits.summary(l.idx) | bits.summary(r.idx),
            "summary mismatch at node {} covering {}..={}",
            node.idx,
            node.lo,
            node.hi
        );
        check(bits, l);
        check(bits, r);
    }
    check(bits, bits.root());
}

/// Dense boolean vectors with a length drawn from `len`.
pub fn bits_strategy(len: Range<usize>) -> impl Strategy<Value = Vec<bool>> {
    vec(any::<bool>(), len)
}

/// Pairs of dense boolean vectors sharing a length drawn from `len`.
pub fn bits_pair_strategy(len: Range<usize>) -> impl Strategy<Value = (Vec<bool>, Vec<bool>)> {
    len.prop_flat_map(|n| (vec(any::<bool>(), n), vec(any::<bool>(), n)))
}

/// Seeded generator of dense bitmaps with a controlled number of set bits.
pub struct BitsGen {
    rng: rand::rngs::StdRng,
}

impl BitsGen {
    pub fn new(seed: u64) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self { rng }
    }

    /// Returns `ones` distinct positions below `size`, sorted.
    #[track_caller]
    pub fn positions(&mut self, size: usize, ones: usize) -> Vec<usize> {
        let out = index::sample(&mut self.rng, size, ones)
            .into_iter()
            .sorted()
            .collect_vec();
        assert_eq!(out.len(), ones);
        out
    }

    /// Returns a dense bitmap of length `size` with exactly `ones` bits set.
    pub fn sparse(&mut self, size: usize, ones: usize) -> BitBox<u64, Lsb0> {
        mkbits(size, self.positions(size, ones))
    }

    /// Returns a dense bitmap of length `size` where roughly `ratio` of the bits are set.
    pub fn with_density(&mut self, size: usize, ratio: f64) -> BitBox<u64, Lsb0> {
        let ones = ((size as f64) * ratio.clamp(0.0, 1.0)).round() as usize;
        self.sparse(size, ones)
    }
}
