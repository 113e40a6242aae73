//! Reqwest-backed client for the provider REST API.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::provider::types::{
    ApiErrorBody, Content, EmbedContentRequest, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse, TaskType,
};
use crate::provider::{EmbeddingBackend, GenerationBackend, ProviderError};
use crate::registry::{GenerationConfig, SafetySetting};

/// Header carrying the API key on every outbound call.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

const ERROR_MESSAGE_MAX_LEN: usize = 256;

/// Client for the generation and embedding endpoints.
///
/// Holds one connection pool; cloning is cheap and shares it.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    generation_model: String,
    embedding_model: String,
}

impl GeminiClient {
    /// Builds a client from the loaded configuration. The per-call timeout
    /// is baked into the underlying HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.call_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            generation_model: config.generation_model.clone(),
            embedding_model: config.embedding_model.clone(),
        })
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: api_error_message(&payload),
            });
        }

        serde_json::from_str(&payload).map_err(|e| {
            ProviderError::malformed(format!("failed to decode response JSON: {}", e))
        })
    }

    async fn embed(
        &self,
        text: &str,
        task_type: TaskType,
        title: Option<&str>,
    ) -> Result<Vec<f32>, ProviderError> {
        let url = format!(
            "{}/models/{}:embedContent",
            self.base_url, self.embedding_model
        );
        let request = EmbedContentRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content::from_text(text),
            task_type,
            title,
        };

        let response: EmbedContentResponse = self.post_json(&url, &request).await?;
        let values = response.into_values()?;
        debug!(dim = values.len(), ?task_type, "embedding received");
        Ok(values)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        safety: &[SafetySetting],
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.generation_model
        );
        let request = GenerateContentRequest {
            contents: vec![Content::from_text(prompt)],
            generation_config: config,
            safety_settings: safety,
        };

        let response: GenerateContentResponse = self.post_json(&url, &request).await?;
        response.into_text()
    }
}

#[async_trait]
impl EmbeddingBackend for GeminiClient {
    async fn embed_document(&self, title: &str, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.embed(text, TaskType::RetrievalDocument, Some(title))
            .await
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.embed(text, TaskType::RetrievalQuery, None).await
    }
}

/// Pulls the provider's error message out of a non-success body, falling
/// back to the (truncated) raw payload when it is not the documented shape.
pub(crate) fn api_error_message(payload: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(payload) {
        Ok(body) => body.error.message,
        Err(_) => {
            let mut message = payload.trim().to_string();
            if message.len() > ERROR_MESSAGE_MAX_LEN {
                message.truncate(
                    message
                        .char_indices()
                        .nth(ERROR_MESSAGE_MAX_LEN)
                        .map(|(idx, _)| idx)
                        .unwrap_or(message.len()),
                );
            }
            message
        }
    }
}
