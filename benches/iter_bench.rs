use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use roaring::RoaringBitmap;

use segbitset::{SegBitset, testutil::BitsGen};

const SEED: u64 = 0xDEAD_BEEF;
const SIZE: usize = 100_000;
const DENSITIES: [f64; 3] = [0.01, 0.1, 0.5];

fn benchmark_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");
    let mut set_gen = BitsGen::new(SEED);

    for density in DENSITIES {
        let dense = set_gen.with_density(SIZE, density);
        let bits = SegBitset::from_bits(dense.as_bitslice());
        let expected = dense.count_ones();

        group.bench_function(BenchmarkId::new("segbitset/first_next", density), |b| {
            b.iter(|| {
                let mut count = 0;
                let mut pos = bits.first();
                while pos != bits.size() {
                    count += 1;
                    pos = bits.next(pos);
                }
                assert_eq!(count, expected);
                black_box(count)
            })
        });

        group.bench_function(BenchmarkId::new("segbitset/for_each", density), |b| {
            b.iter(|| {
                let mut count = 0;
                bits.for_each(|pos| {
                    black_box(pos);
                    count += 1;
                });
                black_box(count)
            })
        });

        group.bench_function(BenchmarkId::new("segbitset/iter", density), |b| {
            b.iter(|| black_box(bits.iter().sum::<usize>()))
        });

        group.bench_function(BenchmarkId::new("bitvec/iter_ones", density), |b| {
            b.iter(|| black_box(dense.iter_ones().sum::<usize>()))
        });

        group.bench_function(BenchmarkId::new("bitvec/scan", density), |b| {
            b.iter(|| {
                let mut count = 0;
                for pos in 0..dense.len() {
                    if dense[pos] {
                        count += 1;
                    }
                }
                black_box(count)
            })
        });

        group.bench_function(BenchmarkId::new("roaring/iter", density), |b| {
            let roaring: RoaringBitmap = dense.iter_ones().map(|pos| pos as u32).collect();
            b.iter(|| black_box(roaring.iter().map(|v| v as usize).sum::<usize>()))
        });
    }

    group.finish();
}

fn benchmark_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count");
    let mut set_gen = BitsGen::new(SEED);

    for density in DENSITIES {
        let dense = set_gen.with_density(SIZE, density);
        let bits = SegBitset::from_bits(dense.as_bitslice());

        group.bench_function(BenchmarkId::new("segbitset", density), |b| {
            b.iter(|| black_box(bits.count()))
        });

        group.bench_function(BenchmarkId::new("bitvec", density), |b| {
            b.iter(|| black_box(dense.count_ones()))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_enumerate, benchmark_count);
criterion_main!(benches);
