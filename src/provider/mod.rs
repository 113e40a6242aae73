//! Provider clients for the generation and embedding endpoints.
//!
//! The ranker and gateway depend on the [`GenerationBackend`] and
//! [`EmbeddingBackend`] traits, not on the concrete [`GeminiClient`], so the
//! whole pipeline runs against `MockProvider` in tests.

pub mod client;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{API_KEY_HEADER, GeminiClient};
pub use error::ProviderError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockProvider;

use async_trait::async_trait;

use crate::registry::{GenerationConfig, SafetySetting};

/// Produces one text completion per call.
///
/// One outbound call per invocation, no retries; failures propagate to the
/// caller untouched.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        safety: &[SafetySetting],
    ) -> Result<String, ProviderError>;
}

/// Embeds text into the provider's shared vector space.
///
/// The returned dimensionality is fixed by the provider's embedding model
/// and identical across calls within a deployment; nothing here assumes a
/// particular size.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embeds candidate text as retrieval-document content, with the given
    /// title attached as metadata.
    async fn embed_document(&self, title: &str, text: &str) -> Result<Vec<f32>, ProviderError>;

    /// Embeds the prompt as a retrieval query (no title).
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}
