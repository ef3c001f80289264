//! HNSW recall floor against brute-force ground truth (spec scenario S8)
//!
//! Not a property test: this is a fixed-seed statistical acceptance check,
//! not an invariant that must hold for arbitrary input.

use hnsw_index::{HnswParams, Index};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn random_unit_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut v: Vec<f32> = (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect();
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for x in v.iter_mut() {
                    *x /= norm;
                }
            }
            v
        })
        .collect()
}

#[test]
fn recall_floor_on_uniform_random_unit_vectors() {
    let dim = 8;
    let n = 1000;
    let k = 10;
    let m = 16;
    let m0 = 32;
    let ml = 1.0 / (m as f64).ln();
    let ef = 50;
    let num_queries = 100;

    let vectors = random_unit_vectors(n, dim, 1);
    let queries = random_unit_vectors(num_queries, dim, 2);

    let brute = Index::brute(vectors.clone()).unwrap();
    let hnsw = Index::hnsw_seeded(
        vectors,
        HnswParams {
            m,
            m0,
            ml,
            ef_construction: 200,
        },
        3,
    )
    .unwrap();

    let mut total_recall = 0.0;
    for query in &queries {
        let truth: HashSet<usize> = brute
            .knn_brute(query, k)
            .unwrap()
            .into_iter()
            .map(|h| h.id)
            .collect();
        let approx: HashSet<usize> = hnsw
            .approximate_knn(query, k, ef)
            .unwrap()
            .into_iter()
            .map(|h| h.id)
            .collect();

        let hit_count = truth.intersection(&approx).count();
        total_recall += hit_count as f64 / truth.len() as f64;
    }

    let mean_recall = total_recall / num_queries as f64;
    assert!(
        mean_recall >= 0.9,
        "mean recall {mean_recall:.3} fell below the 0.9 acceptance floor"
    );
}
