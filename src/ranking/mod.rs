//! Candidate generation, embedding, and selection.
//!
//! One [`CandidateRanker::rank`] call runs the whole per-request pipeline:
//! one generation per registry entry (in registry order), one document
//! embedding per candidate (in candidate order), one query embedding for the
//! prompt, then a stable dot-product argmax. Every step is sequential and a
//! failure at any point aborts the request with no partial result.
//!
//! Nothing here is cached or shared between requests; the ranker itself is
//! immutable after construction.

pub mod error;


pub use error::RankingError;

use tracing::{debug, info};

use crate::provider::{EmbeddingBackend, GenerationBackend};
use crate::registry::Registry;

/// One generated response and its document embedding.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Stringified temperature of the configuration that produced the text.
    pub label: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// The winning candidate of one ranking request.
#[derive(Debug, Clone)]
pub struct Ranked {
    pub text: String,
    pub label: String,
    pub score: f32,
}

/// Orchestrates the generation and embedding backends across the registry.
#[derive(Debug, Clone)]
pub struct CandidateRanker<G, E> {
    generator: G,
    embedder: E,
    registry: Registry,
}

impl<G, E> CandidateRanker<G, E>
where
    G: GenerationBackend,
    E: EmbeddingBackend,
{
    pub fn new(generator: G, embedder: E, registry: Registry) -> Self {
        Self {
            generator,
            embedder,
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Generates one candidate per registry entry, embeds them and the
    /// prompt, and returns the candidate most similar to the prompt.
    pub async fn rank(&self, prompt: &str) -> Result<Ranked, RankingError> {
        if self.registry.is_empty() {
            return Err(RankingError::EmptyRegistry);
        }

        info!(prompt = %prompt, candidates = self.registry.len(), "ranking prompt");

        let mut drafts = Vec::with_capacity(self.registry.len());
        for config in self.registry.configs() {
            let text = self
                .generator
                .generate(prompt, config, self.registry.safety_settings())
                .await
                .map_err(RankingError::Generation)?;

            debug!(
                temperature = config.temperature,
                chars = text.len(),
                "candidate generated"
            );
            drafts.push((config.temperature_label(), text));
        }

        let mut candidates = Vec::with_capacity(drafts.len());
        for (label, text) in drafts {
            let embedding = self
                .embedder
                .embed_document(&label, &text)
                .await
                .map_err(RankingError::Embedding)?;

            candidates.push(Candidate {
                label,
                text,
                embedding,
            });
        }

        let query = self
            .embedder
            .embed_query(prompt)
            .await
            .map_err(RankingError::Embedding)?;

        let (index, score) = select_best(&candidates, &query)?;
        let winner = candidates.swap_remove(index);

        info!(temperature = %winner.label, score, "candidate selected");

        Ok(Ranked {
            text: winner.text,
            label: winner.label,
            score,
        })
    }
}

/// Picks the candidate whose embedding has the maximum dot product with the
/// query embedding.
///
/// The comparison is strictly-greater, so exact ties keep the earliest
/// candidate. Deterministic for a fixed input set.
pub fn select_best(candidates: &[Candidate], query: &[f32]) -> Result<(usize, f32), RankingError> {
    if candidates.is_empty() {
        return Err(RankingError::NoCandidates);
    }

    let mut best_index = 0;
    let mut best_score = f32::NEG_INFINITY;

    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.embedding.len() != query.len() {
            return Err(RankingError::DimensionMismatch {
                expected: query.len(),
                actual: candidate.embedding.len(),
            });
        }

        let score = dot_product(&candidate.embedding, query);
        debug!(label = %candidate.label, score, "candidate scored");

        if score > best_score {
            best_index = index;
            best_score = score;
        }
    }

    Ok((best_index, best_score))
}

#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
