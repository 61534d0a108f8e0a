use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use medley::{diversify_ordered_candidates, select_ranked_diverse, Candidate, SelectionRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn synthetic_pool(n: usize) -> Vec<Candidate> {
    // Deterministic pool: a fixed RNG seed, ~n/8 fine groups over 4 coarse groups.
    let mut rng = StdRng::seed_from_u64(0xFEA7);
    (0..n)
        .map(|i| {
            let fine = rng.gen_range(0..(n / 8).max(2));
            Candidate::new(
                format!("cand{i}"),
                rng.gen_range(0.0..1.0),
                format!("fine{fine}"),
                format!("coarse{}", fine % 4),
            )
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_ranked_diverse");
    for &n in &[64usize, 512usize, 4096usize] {
        let pool = synthetic_pool(n);
        let req = SelectionRequest {
            limit: 24,
            max_per_coarse_strict: 3,
            max_per_coarse_relaxed: 5,
            seed: 12345,
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| {
                let picked = select_ranked_diverse(black_box(&pool), black_box(&req));
                black_box(picked);
            })
        });
    }
    group.finish();
}

fn bench_diversify(c: &mut Criterion) {
    let mut group = c.benchmark_group("diversify_ordered");
    for &n in &[64usize, 512usize, 4096usize] {
        let pool = synthetic_pool(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| {
                let picked = diversify_ordered_candidates(black_box(&pool), 24);
                black_box(picked);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select, bench_diversify);
criterion_main!(benches);
