//! Index facade: owns the graph and vectors, routes queries to HNSW or brute force

use serde::{Deserialize, Serialize};

use crate::brute::knn_brute;
use crate::builder::Builder;
use crate::error::{HnswError, Result};
use crate::node::Node;
use crate::search;

/// Tunable parameters for HNSW graph construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HnswParams {
    /// Cap on connections per node at layers ≥ 1.
    pub m: usize,
    /// Cap on connections per node at layer 0 (typically `2 * m`).
    pub m0: usize,
    /// Level-generation factor; typically `1 / ln(m)`.
    pub ml: f64,
    /// Candidate pool width used during construction.
    pub ef_construction: usize,
}

impl HnswParams {
    pub fn new(m: usize) -> Self {
        Self {
            m,
            m0: m * 2,
            ml: 1.0 / (m as f64).ln(),
            ef_construction: m * 2,
        }
    }

    /// Lower recall, faster build and search.
    pub fn fast() -> Self {
        Self::new(8)
    }

    /// Default working point.
    pub fn balanced() -> Self {
        Self::new(16)
    }

    /// Higher recall, slower build and search.
    pub fn high_quality() -> Self {
        let mut p = Self::new(32);
        p.ef_construction = 400;
        p
    }

    fn validate(&self) -> Result<()> {
        if self.m < 2 {
            return Err(HnswError::InvalidParameter(format!(
                "m must be >= 2, got {}",
                self.m
            )));
        }
        if self.m0 < self.m {
            return Err(HnswError::InvalidParameter(format!(
                "m0 ({}) must be >= m ({})",
                self.m0, self.m
            )));
        }
        if !(self.ml > 0.0 && self.ml < 1.0) {
            return Err(HnswError::InvalidParameter(format!(
                "ml must be in (0, 1), got {}",
                self.ml
            )));
        }
        if self.ef_construction < self.m {
            return Err(HnswError::InvalidParameter(format!(
                "ef_construction ({}) must be >= m ({})",
                self.ef_construction, self.m
            )));
        }
        Ok(())
    }
}

impl Default for HnswParams {
    fn default() -> Self {
        Self::balanced()
    }
}

/// An identifier and its distance to the query, in ascending-distance order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: usize,
    pub distance: f32,
}

struct Graph {
    nodes: Vec<Node>,
    entry_point_id: usize,
    graph_max_layer: usize,
}

/// Read-only view of a built graph's topology, returned by
/// [`Index::debug_graph`]. Exists so tests can walk edges without reaching
/// into the crate's private node representation.
#[doc(hidden)]
pub struct DebugGraph {
    pub entry_point_id: usize,
    pub graph_max_layer: usize,
    node_max_layers: Vec<usize>,
    edges: Vec<Vec<Vec<usize>>>,
}

impl DebugGraph {
    pub fn node_count(&self) -> usize {
        self.node_max_layers.len()
    }

    pub fn max_layer_of(&self, node: usize) -> usize {
        self.node_max_layers[node]
    }

    pub fn neighbors(&self, node: usize, layer: usize) -> &[usize] {
        self.edges[node]
            .get(layer)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Owns the vector corpus and an optional HNSW graph; routes `knn` to the
/// graph when present, or to the brute-force fallback otherwise. Once
/// constructed, the index is read-only: queries never mutate the graph.
pub struct Index {
    vectors: Vec<Vec<f32>>,
    dimension: usize,
    graph: Option<Graph>,
}

impl Index {
    /// Brute-force-only index: no graph is built.
    pub fn brute(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = Self::validate_vectors(&vectors)?;
        Ok(Self {
            vectors,
            dimension,
            graph: None,
        })
    }

    /// HNSW index: the graph is built immediately from `vectors`.
    pub fn hnsw(vectors: Vec<Vec<f32>>, params: HnswParams) -> Result<Self> {
        let dimension = Self::validate_vectors(&vectors)?;
        params.validate()?;

        let builder = Builder::new(params.m, params.m0, params.ml, params.ef_construction);
        let (nodes, entry_point_id, graph_max_layer) = builder.build(&vectors);

        Ok(Self {
            vectors,
            dimension,
            graph: Some(Graph {
                nodes,
                entry_point_id,
                graph_max_layer,
            }),
        })
    }

    /// Same as [`Index::hnsw`] but with a deterministic layer sampler,
    /// useful for reproducible tests and benchmarks.
    pub fn hnsw_seeded(vectors: Vec<Vec<f32>>, params: HnswParams, seed: u64) -> Result<Self> {
        let dimension = Self::validate_vectors(&vectors)?;
        params.validate()?;

        let builder = Builder::new(params.m, params.m0, params.ml, params.ef_construction)
            .with_seed(seed);
        let (nodes, entry_point_id, graph_max_layer) = builder.build(&vectors);

        Ok(Self {
            vectors,
            dimension,
            graph: Some(Graph {
                nodes,
                entry_point_id,
                graph_max_layer,
            }),
        })
    }

    fn validate_vectors(vectors: &[Vec<f32>]) -> Result<usize> {
        let dimension = match vectors.first() {
            Some(first) => first.len(),
            None => 0,
        };
        for (id, v) in vectors.iter().enumerate() {
            if v.len() != dimension {
                return Err(HnswError::InvalidParameter(format!(
                    "vector {id} has dimension {}, expected {dimension}",
                    v.len()
                )));
            }
        }
        Ok(dimension)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }

    /// Read-only snapshot of the built graph's connection topology, for
    /// verifying the construction invariants (bidirectionality, entry-point
    /// validity, self-loop freedom, layer containment) over arbitrary
    /// corpora in property tests. Not part of the stable external contract.
    /// Returns `None` for a brute-force-only index (no graph).
    #[doc(hidden)]
    pub fn debug_graph(&self) -> Option<DebugGraph> {
        let graph = self.graph.as_ref()?;
        let node_max_layers = graph.nodes.iter().map(|n| n.max_layer).collect();
        let edges = graph
            .nodes
            .iter()
            .map(|n| (0..=n.max_layer).map(|layer| n.neighbors(layer).to_vec()).collect())
            .collect();
        Some(DebugGraph {
            entry_point_id: graph.entry_point_id,
            graph_max_layer: graph.graph_max_layer,
            node_max_layers,
            edges,
        })
    }

    /// Route to HNSW search with `ef_search = 4 * k` when a graph exists,
    /// otherwise fall back to the exact brute-force scan.
    pub fn knn(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        match &self.graph {
            Some(_) => self.approximate_knn(query, k, 4 * k.max(1)),
            None => self.knn_brute(query, k),
        }
    }

    /// HNSW search with an explicit candidate-pool width.
    pub fn approximate_knn(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<SearchHit>> {
        self.hnsw_knn(query, k, ef)
    }

    /// HNSW search with a narrower candidate pool, trading recall for speed.
    pub fn beam_knn(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<SearchHit>> {
        self.hnsw_knn(query, k, ef.max(k))
    }

    fn hnsw_knn(&self, query: &[f32], k: usize, ef: usize) -> Result<Vec<SearchHit>> {
        let graph = self.graph.as_ref().ok_or(HnswError::EmptyIndex)?;
        if self.vectors.is_empty() {
            return Ok(Vec::new());
        }

        tracing::trace!(k, ef, "hnsw knn query");

        let ids = search::knn(
            &self.vectors,
            &graph.nodes,
            graph.entry_point_id,
            graph.graph_max_layer,
            query,
            k,
            ef,
        );
        Ok(self.to_hits(query, ids))
    }

    /// Exact k-NN via linear scan, ignoring any graph.
    pub fn knn_brute(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if self.vectors.is_empty() {
            return Ok(Vec::new());
        }
        let ids = knn_brute(&self.vectors, query, k);
        Ok(self.to_hits(query, ids))
    }

    fn to_hits(&self, query: &[f32], ids: Vec<usize>) -> Vec<SearchHit> {
        ids.into_iter()
            .map(|id| SearchHit {
                id,
                distance: crate::distance::euclidean(query, &self.vectors[id]),
            })
            .collect()
    }
}
