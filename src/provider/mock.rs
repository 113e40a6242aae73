//! Recording mock implementing both provider backends.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::provider::{EmbeddingBackend, GenerationBackend, ProviderError};
use crate::registry::{GenerationConfig, SafetySetting};

/// In-memory provider double.
///
/// Generation returns scripted texts in push order; embeddings are looked up
/// by exact text. Every call is recorded so tests can assert on call counts
/// and ordering. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    generations: Vec<String>,
    embeddings: HashMap<String, Vec<f32>>,
    query_embedding: Option<Vec<f32>>,
    fail_generation_at: Option<usize>,
    fail_embedding: bool,
    generation_calls: Vec<f64>,
    document_calls: Vec<(String, String)>,
    query_calls: Vec<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a generation response; the n-th generation call returns the
    /// n-th pushed text.
    pub fn push_generation(&self, text: &str) {
        self.inner.lock().unwrap().generations.push(text.to_string());
    }

    /// Sets the vector returned when `text` is embedded as a document.
    pub fn set_embedding(&self, text: &str, embedding: Vec<f32>) {
        self.inner
            .lock()
            .unwrap()
            .embeddings
            .insert(text.to_string(), embedding);
    }

    /// Sets the vector returned for every query embedding.
    pub fn set_query_embedding(&self, embedding: Vec<f32>) {
        self.inner.lock().unwrap().query_embedding = Some(embedding);
    }

    /// Makes the generation call with the given zero-based index fail.
    pub fn fail_generation_at(&self, index: usize) {
        self.inner.lock().unwrap().fail_generation_at = Some(index);
    }

    /// Makes every embedding call fail.
    pub fn fail_embedding(&self) {
        self.inner.lock().unwrap().fail_embedding = true;
    }

    /// Temperatures of the generation calls made so far, in call order.
    pub fn generation_calls(&self) -> Vec<f64> {
        self.inner.lock().unwrap().generation_calls.clone()
    }

    /// `(title, text)` pairs of the document-embedding calls made so far.
    pub fn document_calls(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().document_calls.clone()
    }

    /// Texts of the query-embedding calls made so far.
    pub fn query_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().query_calls.clone()
    }

    /// Total provider calls of any kind made so far.
    pub fn total_calls(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.generation_calls.len() + inner.document_calls.len() + inner.query_calls.len()
    }

    fn scripted_failure(kind: &str) -> ProviderError {
        ProviderError::Api {
            status: 500,
            message: format!("mock {} failure", kind),
        }
    }
}

#[async_trait]
impl GenerationBackend for MockProvider {
    async fn generate(
        &self,
        _prompt: &str,
        config: &GenerationConfig,
        _safety: &[SafetySetting],
    ) -> Result<String, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        let call_index = inner.generation_calls.len();
        inner.generation_calls.push(config.temperature);

        if inner.fail_generation_at == Some(call_index) {
            return Err(Self::scripted_failure("generation"));
        }

        inner
            .generations
            .get(call_index)
            .cloned()
            .ok_or_else(|| ProviderError::malformed("mock has no generation scripted"))
    }
}

#[async_trait]
impl EmbeddingBackend for MockProvider {
    async fn embed_document(&self, title: &str, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .document_calls
            .push((title.to_string(), text.to_string()));

        if inner.fail_embedding {
            return Err(Self::scripted_failure("embedding"));
        }

        inner
            .embeddings
            .get(text)
            .cloned()
            .ok_or_else(|| ProviderError::malformed("mock has no embedding for text"))
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.query_calls.push(text.to_string());

        if inner.fail_embedding {
            return Err(Self::scripted_failure("embedding"));
        }

        inner
            .query_embedding
            .clone()
            .ok_or_else(|| ProviderError::malformed("mock has no query embedding set"))
    }
}
