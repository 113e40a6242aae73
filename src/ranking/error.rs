//! Ranking error types.

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors that abort a ranking request.
///
/// Any failure anywhere in the pipeline aborts the whole operation; there is
/// no partial degradation to fewer candidates.
#[derive(Debug, Error)]
pub enum RankingError {
    /// A generation call failed; no further provider calls are made.
    #[error("candidate generation failed: {0}")]
    Generation(ProviderError),

    /// A document or query embedding call failed.
    #[error("candidate embedding failed: {0}")]
    Embedding(ProviderError),

    /// The registry holds no generation configurations.
    #[error("no generation configurations registered")]
    EmptyRegistry,

    /// Selection was asked to pick from an empty candidate set.
    #[error("no candidates provided for selection")]
    NoCandidates,

    /// A candidate embedding does not share the query embedding's
    /// dimensionality.
    #[error("embedding dimension mismatch: query has {expected}, candidate has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
