use std::sync::Arc;
use std::time::Duration;

use crate::provider::{EmbeddingBackend, GenerationBackend};
use crate::ranking::CandidateRanker;

/// Shared, immutable per-process state handed to every request handler.
#[derive(Debug)]
pub struct HandlerState<
    G: GenerationBackend + Clone + Send + Sync + 'static,
    E: EmbeddingBackend + Clone + Send + Sync + 'static,
> {
    pub ranker: Arc<CandidateRanker<G, E>>,

    /// Deadline covering one whole ranking request (all outbound calls).
    pub request_deadline: Duration,
}

impl<G, E> Clone for HandlerState<G, E>
where
    G: GenerationBackend + Clone + Send + Sync + 'static,
    E: EmbeddingBackend + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            ranker: Arc::clone(&self.ranker),
            request_deadline: self.request_deadline,
        }
    }
}

impl<G, E> HandlerState<G, E>
where
    G: GenerationBackend + Clone + Send + Sync + 'static,
    E: EmbeddingBackend + Clone + Send + Sync + 'static,
{
    pub fn new(ranker: CandidateRanker<G, E>, request_deadline: Duration) -> Self {
        Self {
            ranker: Arc::new(ranker),
            request_deadline,
        }
    }
}
