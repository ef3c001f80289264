//! Exact linear-scan k-nearest-neighbor fallback

use crate::distance::euclidean;
use rayon::prelude::*;

/// Exact k-NN via linear scan, returning ids in ascending-distance order.
///
/// Distances are computed in parallel across the corpus with `rayon` (an
/// embarrassingly parallel fan-out over independent vectors), then merged
/// sequentially into a sorted length-`k` buffer. Result order and content
/// are identical to a purely sequential shift-insert scan.
pub fn knn_brute(vectors: &[Vec<f32>], query: &[f32], k: usize) -> Vec<usize> {
    if vectors.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f32)> = vectors
        .par_iter()
        .enumerate()
        .map(|(id, v)| (id, euclidean(query, v)))
        .collect();

    let take = k.min(scored.len());
    scored.select_nth_unstable_by(take - 1, |a, b| {
        a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(take);
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    scored.into_iter().map(|(id, _)| id).collect()
}
