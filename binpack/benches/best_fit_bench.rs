use std::hint::black_box;

use binpack::collectors::{best_fit_stream, par_best_fit_stream};
use binpack::policies::{AsIs, BestFit};
use binpack::{Bin, BinPacker};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use itertools::Itertools;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};

criterion_main!(benches);
criterion_group!(benches, best_fit_bench);

const CAPACITY: f64 = 100.0;
const N_PIECES: [usize; 3] = [1_000, 5_000, 20_000];

fn random_pieces(n: usize) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(0);
    (0..n).map(|_| rng.random_range(1.0..=CAPACITY)).collect_vec()
}

/// Scanning best fit (linear in the number of open bins per piece) versus the indexed variants
fn best_fit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_fit_bench");
    group.sample_size(10);

    let packer = BinPacker::new()
        .with_piece_pre_order(AsIs)
        .with_packing_policy(BestFit);

    for n in N_PIECES {
        let pieces = random_pieces(n);

        group.bench_with_input(BenchmarkId::new("scan", n), &pieces, |b, pieces| {
            b.iter(|| {
                packer
                    .pack_all(black_box(pieces.clone()), vec![], vec![CAPACITY])
                    .unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("index", n), &pieces, |b, pieces| {
            b.iter(|| {
                best_fit_stream(black_box(pieces.iter().copied()), || Bin::new(vec![CAPACITY]), |p| p)
                    .unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("par_index", n), &pieces, |b, pieces| {
            b.iter(|| {
                par_best_fit_stream(black_box(pieces.as_slice()), || Bin::new(vec![CAPACITY]), |&p| p)
                    .unwrap()
            })
        });
    }
    group.finish();
}
