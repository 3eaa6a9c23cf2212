use bitvec::{bitbox, order::Lsb0};
use segbitset::SegBitset;

const SIZE: usize = 1024 * 100;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    // build a dense bitmap with a handful of bits set
    let mut dense = bitbox![u64, Lsb0; 0; SIZE];
    for pos in [1, 20, 31, 1341] {
        dense.set(pos, true);
    }

    // and turn it into a segment tree bitset
    let bits = SegBitset::from_bits(dense.as_bitslice());

    println!("bits[1] = {}", bits[1]);
    println!("bits[0] = {}", bits[0]);

    // walk the set positions with first/next; size() marks the end
    let mut pos = bits.first();
    while pos != bits.size() {
        println!("first/next: {pos}");
        pos = bits.next(pos);
    }

    // or visit them all in a single pass
    bits.for_each(|pos| println!("for_each: {pos}"));

    // handles locate their bit once and can be reused
    let mut bits = bits;
    let mut bit = bits.bit_mut(20).expect("20 is in range");
    let was_set = bit.test_and_flip();
    println!("bit 20 was {was_set}, now {}", bit.get());

    println!(
        "{} of {} bits set, using {} tree slots",
        bits.count(),
        bits.size(),
        bits.capacity()
    );
    assert_eq!(bits.to_bits().count_ones(), 3);
}
