//! Wire types for the provider's `generateContent` and `embedContent` calls.
//!
//! Every field the orchestration depends on is typed and validated here; a
//! response missing one of them becomes a
//! [`ProviderError::MalformedResponse`] instead of a panic or a silent
//! default.

use serde::{Deserialize, Serialize};

use crate::provider::ProviderError;
use crate::registry::{GenerationConfig, SafetySetting};

/// A text part of a content block. Non-text parts deserialize with
/// `text: None` and are skipped when collecting output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One content block (request prompt or response candidate body).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn from_text(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content>,
    pub generation_config: &'a GenerationConfig,
    pub safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCandidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the full generated text of the first candidate.
    ///
    /// A block reason takes precedence over a missing candidate so callers
    /// see the safety refusal rather than a generic shape error.
    pub fn into_text(self) -> Result<String, ProviderError> {
        if let Some(feedback) = &self.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(ProviderError::Blocked {
                    reason: reason.clone(),
                });
            }
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed("response contained no candidates"))?;

        let content = candidate
            .content
            .ok_or_else(|| ProviderError::malformed("candidate missing content"))?;

        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(ProviderError::malformed("candidate contained no text parts"));
        }

        Ok(text)
    }
}

/// Embedding task type hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    RetrievalDocument,
    RetrievalQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedContentRequest<'a> {
    /// Fully-qualified model name (`models/{model}`), repeated in the body
    /// per the provider contract.
    pub model: String,
    pub content: Content,
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct EmbedContentResponse {
    #[serde(default)]
    pub embedding: Option<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
pub struct ContentEmbedding {
    #[serde(default)]
    pub values: Vec<f32>,
}

impl EmbedContentResponse {
    /// Extracts the embedding vector, whatever dimensionality the provider
    /// chose to return.
    pub fn into_values(self) -> Result<Vec<f32>, ProviderError> {
        let embedding = self
            .embedding
            .ok_or_else(|| ProviderError::malformed("response missing embedding"))?;

        if embedding.values.is_empty() {
            return Err(ProviderError::malformed("embedding contained no values"));
        }

        Ok(embedding.values)
    }
}

/// Shape of the provider's error body, used to pull a readable message out
/// of non-success responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}
