//! Error types for the HNSW index

/// Errors that can occur while constructing or querying an index
///
/// A per-vector dimension mismatch is not one of these: spec §7 routes it
/// through `distance::euclidean` returning positive infinity instead, so a
/// mismatched query ranks last rather than aborting the search.
#[derive(Debug, thiserror::Error)]
pub enum HnswError {
    /// Also returned for an HNSW-only query (`approximate_knn`/`beam_knn`)
    /// issued against an index with no graph. There is no third recoverable
    /// kind for "the graph this query needs doesn't exist" in §7's taxonomy,
    /// and both cases mean the same thing to the caller: nothing to search.
    #[error("query against an empty index")]
    EmptyIndex,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, HnswError>;
