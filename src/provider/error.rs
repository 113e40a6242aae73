//! Provider error types.

use thiserror::Error;

/// Errors surfaced by the generation and embedding clients.
///
/// No retry or recovery happens at this layer; every variant propagates to
/// the ranker, which aborts the request.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider refused to generate for this prompt.
    #[error("prompt blocked by provider safety filters: {reason}")]
    Blocked { reason: String },

    /// The response decoded, but a required field was absent or empty.
    #[error("malformed provider response: {detail}")]
    MalformedResponse { detail: String },
}

impl ProviderError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }
}
