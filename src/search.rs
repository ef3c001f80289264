//! Layer-wise greedy descent and base-layer beam search
//!
//! Both construction (via `Builder`) and query time share this module:
//! the builder calls `search_layer` directly per layer while connecting a
//! new node, and `knn` composes the same primitive with the upper-layer
//! width-1 descent for read-only queries.

use crate::distance::euclidean;
use crate::heap::{BoundedHeap, HeapKind};
use crate::node::Node;

/// Best-first expansion of the candidate frontier at a single layer.
///
/// Maintains a min-heap frontier (what to expand next) and a max-heap
/// results buffer bounded to `ef` entries (the worst-so-far is evicted
/// first), plus a visited set sized to the graph. Terminates once the
/// frontier's best candidate can no longer improve on the worst accepted
/// result.
pub fn search_layer(
    vectors: &[Vec<f32>],
    nodes: &[Node],
    query: &[f32],
    entry: usize,
    layer: usize,
    ef: usize,
) -> Vec<usize> {
    let mut visited = vec![false; nodes.len()];
    // The frontier drives expansion order only; nothing is gained by
    // bounding it to ef the way `results` is, and a visited node is pushed
    // at most once, so sizing it to the graph keeps it effectively
    // unbounded without ever evicting a candidate still worth exploring.
    let mut frontier = BoundedHeap::new(HeapKind::Min, nodes.len().max(1));
    let mut results = BoundedHeap::new(HeapKind::Max, ef.max(1));

    let entry_dist = euclidean(query, &vectors[entry]);
    visited[entry] = true;
    frontier.insert(entry, entry_dist);
    results.insert(entry, entry_dist);

    while let Some((current_id, current_dist)) = frontier.pop() {
        if let Some(worst) = results.peek_root() {
            if results.size() >= ef.max(1) && current_dist > worst {
                break;
            }
        }

        for &neighbor_id in nodes[current_id].neighbors(layer) {
            if visited[neighbor_id] {
                continue;
            }
            visited[neighbor_id] = true;

            let dist = euclidean(query, &vectors[neighbor_id]);
            let has_room = results.size() < ef.max(1);
            let improves = results
                .peek_root()
                .map(|worst| dist < worst)
                .unwrap_or(true);

            if has_room || improves {
                frontier.insert(neighbor_id, dist);
                results.insert(neighbor_id, dist);
            }
        }
    }

    results
        .drain_sorted()
        .into_iter()
        .map(|(id, _)| id)
        .collect()
}

/// Full k-NN query: width-1 greedy descent through the upper layers,
/// followed by a bounded beam search at layer 0.
pub fn knn(
    vectors: &[Vec<f32>],
    nodes: &[Node],
    entry_point_id: usize,
    graph_max_layer: usize,
    query: &[f32],
    k: usize,
    ef_search: usize,
) -> Vec<usize> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let mut current = entry_point_id;
    for layer in (1..=graph_max_layer).rev() {
        let next = search_layer(vectors, nodes, query, current, layer, 1);
        if let Some(&best) = next.first() {
            current = best;
        }
    }

    let result = search_layer(vectors, nodes, query, current, 0, ef_search.max(1));
    let take = k.min(result.len());
    result[..take].to_vec()
}
