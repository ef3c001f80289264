//! Incremental HNSW graph construction
//!
//! Phase 1 samples each node's maximum layer and elects an entry point.
//! Phase 2 inserts nodes one at a time: a width-1 greedy descent narrows
//! down to the node's own top layer, then a beam search plus
//! distance+diversity neighbor selection wires bidirectional edges from
//! that layer down to layer 0.
//!
//! Backlinks are never pruned: a neighbor's own connection list can grow
//! past its nominal cap once other nodes link back to it. This keeps every
//! edge bidirectional unconditionally, which the cap itself is not
//! guaranteed to survive (see the module-level note on `select_neighbors`).

use crate::distance::euclidean;
use crate::node::Node;
use crate::sampler::LayerSampler;
use crate::search::search_layer;

/// Clustering-avoidance threshold for diversity-based neighbor selection, a
/// candidate is rejected if it sits closer to an already-accepted
/// neighbor than `DEFAULT_DIVERSITY_FACTOR` times its own distance to the
/// node being inserted. Fixed in the algorithm description, exposed here as
/// a builder field so it can be tuned without changing call sites.
pub const DEFAULT_DIVERSITY_FACTOR: f32 = 0.7;

pub struct Builder {
    m: usize,
    m0: usize,
    ml: f64,
    ef_construction: usize,
    diversity_factor: f32,
    seed: Option<u64>,
}

impl Builder {
    pub fn new(m: usize, m0: usize, ml: f64, ef_construction: usize) -> Self {
        Self {
            m,
            m0,
            ml,
            ef_construction,
            diversity_factor: DEFAULT_DIVERSITY_FACTOR,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_diversity_factor(mut self, factor: f32) -> Self {
        self.diversity_factor = factor;
        self
    }

    /// Build the full graph over `vectors`, returning the node array, the
    /// entry point id, and the graph's max layer. Returns an empty node
    /// array with `graph_max_layer = 0` for an empty input.
    pub fn build(&self, vectors: &[Vec<f32>]) -> (Vec<Node>, usize, usize) {
        let n = vectors.len();
        if n == 0 {
            return (Vec::new(), 0, 0);
        }

        tracing::debug!(
            n,
            m = self.m,
            m0 = self.m0,
            ef_construction = self.ef_construction,
            "hnsw build starting"
        );

        let mut sampler = match self.seed {
            Some(seed) => LayerSampler::seeded(seed),
            None => LayerSampler::new(),
        };

        // Phase 1: sample layers, elect the entry point.
        let mut nodes: Vec<Node> = Vec::with_capacity(n);
        let layer0 = sampler.sample(self.ml);
        nodes.push(Node::create(0, layer0, self.m, self.m0));
        let mut graph_max_layer = layer0;
        let mut entry_point_id = 0usize;

        for i in 1..n {
            let li = sampler.sample(self.ml);
            nodes.push(Node::create(i, li, self.m, self.m0));
            if li > graph_max_layer {
                graph_max_layer = li;
                entry_point_id = i;
            }
        }

        // Phase 2: incremental insertion.
        for i in 1..n {
            self.insert(vectors, &mut nodes, i, entry_point_id, graph_max_layer);
        }

        tracing::debug!(n, graph_max_layer, entry_point_id, "hnsw build complete");

        (nodes, entry_point_id, graph_max_layer)
    }

    fn insert(
        &self,
        vectors: &[Vec<f32>],
        nodes: &mut [Node],
        i: usize,
        entry_point_id: usize,
        graph_max_layer: usize,
    ) {
        let query = &vectors[i];
        let li = nodes[i].max_layer;

        // Descend greedily from the entry point down to the node's own
        // top layer, keeping only the single closest node at each step.
        let mut current = entry_point_id;
        for layer in ((li + 1)..=graph_max_layer).rev() {
            let next = search_layer(vectors, nodes, query, current, layer, 1);
            if let Some(&best) = next.first() {
                current = best;
            }
        }

        // Connect from the node's own top layer down to layer 0.
        for layer in (0..=li).rev() {
            let candidates =
                search_layer(vectors, nodes, query, current, layer, self.ef_construction);
            let mlayer = if layer == 0 { self.m0 } else { self.m };

            let selected = self.select_neighbors(vectors, &candidates, mlayer, query, i);

            for &s in &selected {
                nodes[s].add_edge(layer, i);
                nodes[i].add_edge(layer, s);
            }

            if let Some(&closest) = candidates.first() {
                current = closest;
            }
        }
    }

    /// Distance+diversity neighbor selection (spec §4.5): sort ascending,
    /// always keep the closest, then accept a candidate only if it isn't
    /// too close to an already-accepted neighbor relative to its own
    /// distance to `query`; top up from the remainder if short of `mlayer`.
    fn select_neighbors(
        &self,
        vectors: &[Vec<f32>],
        candidates: &[usize],
        mlayer: usize,
        query: &[f32],
        exclude_id: usize,
    ) -> Vec<usize> {
        let mut sorted: Vec<(usize, f32)> = candidates
            .iter()
            .copied()
            .filter(|&id| id != exclude_id)
            .map(|id| (id, euclidean(query, &vectors[id])))
            .collect();
        sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        if sorted.is_empty() {
            return Vec::new();
        }

        let mut accepted: Vec<(usize, f32)> = vec![sorted[0]];
        let mut leftover: Vec<(usize, f32)> = Vec::new();

        for &(id, dist) in &sorted[1..] {
            if accepted.len() >= mlayer {
                break;
            }
            let too_close = accepted
                .iter()
                .any(|&(s, _)| euclidean(&vectors[id], &vectors[s]) < self.diversity_factor * dist);
            if too_close {
                leftover.push((id, dist));
            } else {
                accepted.push((id, dist));
            }
        }

        if accepted.len() < mlayer {
            for (id, dist) in leftover {
                if accepted.len() >= mlayer {
                    break;
                }
                if !accepted.iter().any(|&(a, _)| a == id) {
                    accepted.push((id, dist));
                }
            }
        }

        accepted.into_iter().map(|(id, _)| id).collect()
    }
}
