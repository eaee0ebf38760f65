use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proclam_core::ProbabilityMatrix;
use proclam_metrics::{rank_auc, RocAuc, Thresholds};

fn random_flat(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

fn random_truth(n: usize, n_classes: usize, seed: u64) -> Vec<usize> {
    random_flat(n, seed)
        .iter()
        .map(|u| ((u * n_classes as f64) as usize).min(n_classes - 1))
        .collect()
}

fn bench_roc_auc(c: &mut Criterion) {
    let mut group = c.benchmark_group("roc_auc");

    let n = 10_000;
    let k = 5;
    let preds = ProbabilityMatrix::from_flat(random_flat(n * k, 42), k).unwrap();
    let truth = random_truth(n, k, 7);
    let metric = RocAuc::default();

    group.bench_function("10k_k5_100_thresholds", |b| {
        b.iter(|| metric.evaluate(black_box(&preds), black_box(&truth), Thresholds::Count(100)))
    });

    group.bench_function("10k_k5_1000_thresholds", |b| {
        b.iter(|| metric.evaluate(black_box(&preds), black_box(&truth), Thresholds::Count(1000)))
    });

    group.finish();
}

fn bench_rank_auc(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_auc");

    let scores = random_flat(100_000, 42);
    let labels: Vec<bool> = random_flat(100_000, 7).iter().map(|&u| u > 0.5).collect();

    group.bench_function("100k", |b| {
        b.iter(|| rank_auc(black_box(&scores), black_box(&labels)))
    });

    group.finish();
}

criterion_group!(benches, bench_roc_auc, bench_rank_auc);
criterion_main!(benches);
