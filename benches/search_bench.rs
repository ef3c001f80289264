use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hnsw_index::{HnswParams, Index};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("hnsw_build");

    for n in [1_000, 10_000] {
        let vectors = random_vectors(n, 32, 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("build", n), &vectors, |b, vectors| {
            b.iter(|| {
                Index::hnsw_seeded(black_box(vectors.clone()), HnswParams::balanced(), 1).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("hnsw_query");

    let vectors = random_vectors(50_000, 32, 2);
    let query = random_vectors(1, 32, 3).remove(0);
    let index = Index::hnsw_seeded(vectors.clone(), HnswParams::balanced(), 2).unwrap();
    let brute = Index::brute(vectors).unwrap();

    group.throughput(Throughput::Elements(1));
    group.bench_function("knn_k10", |b| {
        b.iter(|| index.knn(black_box(&query), black_box(10)).unwrap());
    });

    group.bench_function("beam_knn_narrow_ef", |b| {
        b.iter(|| {
            index
                .beam_knn(black_box(&query), black_box(10), black_box(20))
                .unwrap()
        });
    });

    group.bench_function("knn_brute_k10", |b| {
        b.iter(|| brute.knn_brute(black_box(&query), black_box(10)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
