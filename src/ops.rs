use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign,
};

use crate::{node::Node, segbitset::SegBitset};

// Each pairwise op walks both trees in lockstep and stops at the first node
// whose summaries already decide the result for the whole subtree.
impl SegBitset {
    fn and_node(&mut self, rhs: &SegBitset, node: Node) {
        // 0 & x -> 0
        if !self.summary(node.idx) {
            return;
        }
        // 1 & 0 -> 0
        if !rhs.summary(node.idx) {
            self.clear_node(node);
            return;
        }
        // 1 & 1 -> 1
        if node.is_leaf() {
            return;
        }
        let (l, r) = node.children();
        self.and_node(rhs, l);
        self.and_node(rhs, r);
        self.pushup(node.idx);
    }

    fn or_node(&mut self, rhs: &SegBitset, node: Node) {
        // x | 0 -> x
        if !rhs.summary(node.idx) {
            return;
        }
        if node.is_leaf() {
            self.write(node.idx, true);
            return;
        }
        let (l, r) = node.children();
        self.or_node(rhs, l);
        self.or_node(rhs, r);
        self.pushup(node.idx);
    }

    fn xor_node(&mut self, rhs: &SegBitset, node: Node) {
        // x ^ 0 -> x
        if !rhs.summary(node.idx) {
            return;
        }
        if node.is_leaf() {
            let value = !self.summary(node.idx);
            self.write(node.idx, value);
            return;
        }
        let (l, r) = node.children();
        self.xor_node(rhs, l);
        self.xor_node(rhs, r);
        self.pushup(node.idx);
    }

    fn sub_node(&mut self, rhs: &SegBitset, node: Node) {
        // 0 - x -> 0, x - 0 -> x
        if !self.summary(node.idx) || !rhs.summary(node.idx) {
            return;
        }
        if node.is_leaf() {
            self.write(node.idx, false);
            return;
        }
        let (l, r) = node.children();
        self.sub_node(rhs, l);
        self.sub_node(rhs, r);
        self.pushup(node.idx);
    }

    fn eq_node(&self, rhs: &SegBitset, node: Node) -> bool {
        let summary = self.summary(node.idx);
        if summary != rhs.summary(node.idx) {
            return false;
        }
        // both subtrees are empty, or both leaves are set
        if !summary || node.is_leaf() {
            return true;
        }
        let (l, r) = node.children();
        self.eq_node(rhs, l) && self.eq_node(rhs, r)
    }
}

impl PartialEq for SegBitset {
    /// Two bitsets are equal if they have the same size and the same bits set.
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.eq_node(other, self.root())
    }
}

impl Eq for SegBitset {}

macro_rules! binary_bitop {
    ($BitOp:tt, $bitop:ident, $BitOpAssign:tt, $bitassign:ident, $node_op:ident) => {
        impl $BitOpAssign<&SegBitset> for SegBitset {
            /// # Panics
            ///
            /// Panics if the two bitsets have different sizes.
            fn $bitassign(&mut self, rhs: &SegBitset) {
                assert_eq!(self.size(), rhs.size(), "SegBitset sizes must match");
                self.$node_op(rhs, self.root());
            }
        }
        impl $BitOpAssign<SegBitset> for SegBitset {
            #[inline]
            fn $bitassign(&mut self, rhs: SegBitset) {
                $BitOpAssign::$bitassign(self, &rhs)
            }
        }
        impl $BitOp<&SegBitset> for SegBitset {
            type Output = SegBitset;
            fn $bitop(mut self, rhs: &SegBitset) -> Self::Output {
                $BitOpAssign::$bitassign(&mut self, rhs);
                self
            }
        }
        impl $BitOp<SegBitset> for SegBitset {
            type Output = SegBitset;
            fn $bitop(mut self, rhs: SegBitset) -> Self::Output {
                $BitOpAssign::$bitassign(&mut self, &rhs);
                self
            }
        }
        impl $BitOp<&SegBitset> for &SegBitset {
            type Output = SegBitset;
            fn $bitop(self, rhs: &SegBitset) -> Self::Output {
                $BitOp::$bitop(self.clone(), rhs)
            }
        }
        impl $BitOp<SegBitset> for &SegBitset {
            type Output = SegBitset;
            fn $bitop(self, rhs: SegBitset) -> Self::Output {
                $BitOp::$bitop(self.clone(), &rhs)
            }
        }
    };
}

binary_bitop!(BitAnd, bitand, BitAndAssign, bitand_assign, and_node);
binary_bitop!(BitOr, bitor, BitOrAssign, bitor_assign, or_node);
binary_bitop!(BitXor, bitxor, BitXorAssign, bitxor_assign, xor_node);
binary_bitop!(Sub, sub, SubAssign, sub_assign, sub_node);

impl Not for SegBitset {
    type Output = SegBitset;
    fn not(mut self) -> Self::Output {
        self.flip_all();
        self
    }
}

impl Not for &SegBitset {
    type Output = SegBitset;
    fn not(self) -> Self::Output {
        self.complement()
    }
}
