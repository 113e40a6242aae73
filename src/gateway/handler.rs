use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, instrument};

use crate::gateway::TRIAD_TEMPERATURE_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::provider::{EmbeddingBackend, GenerationBackend};
use crate::ranking::RankingError;

/// `POST /` — ranks candidates for the prompt in the JSON body and returns
/// the winning text as a plain-text response.
#[instrument(skip(state, body), fields(prompt_chars = tracing::field::Empty))]
pub async fn rank_handler<G, E>(
    State(state): State<HandlerState<G, E>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    G: GenerationBackend + Clone + Send + Sync + 'static,
    E: EmbeddingBackend + Clone + Send + Sync + 'static,
{
    let Json(body) = body
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid JSON body: {}", e)))?;

    let prompt = extract_prompt(&body)?;
    tracing::Span::current().record("prompt_chars", prompt.len());

    let ranked = match tokio::time::timeout(state.request_deadline, state.ranker.rank(prompt))
        .await
    {
        Ok(result) => result.map_err(map_ranking_error)?,
        Err(_) => {
            error!(
                deadline_secs = state.request_deadline.as_secs(),
                "ranking request hit deadline"
            );
            return Err(GatewayError::DeadlineExceeded);
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        TRIAD_TEMPERATURE_HEADER,
        HeaderValue::from_str(&ranked.label).unwrap_or(HeaderValue::from_static("unknown")),
    );

    Ok((StatusCode::OK, headers, ranked.text).into_response())
}

/// Validates the request body by hand so malformed input maps to a
/// structured 400 instead of an extractor default. No provider call happens
/// before this returns.
pub(crate) fn extract_prompt(body: &serde_json::Value) -> Result<&str, GatewayError> {
    let prompt = body
        .get("prompt")
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            GatewayError::InvalidRequest("missing or non-string `prompt` field".to_string())
        })?;

    if prompt.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "`prompt` must not be empty".to_string(),
        ));
    }

    Ok(prompt)
}

/// Logs the pipeline failure and maps it to a client-safe error.
pub(crate) fn map_ranking_error(err: RankingError) -> GatewayError {
    error!(error = %err, "ranking failed");

    match err {
        RankingError::Generation(_) => {
            GatewayError::Upstream("candidate generation failed".to_string())
        }
        RankingError::Embedding(_) => {
            GatewayError::Upstream("candidate embedding failed".to_string())
        }
        RankingError::EmptyRegistry
        | RankingError::NoCandidates
        | RankingError::DimensionMismatch { .. } => {
            GatewayError::Internal("candidate selection failed".to_string())
        }
    }
}
