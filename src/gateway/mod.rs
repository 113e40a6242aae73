//! HTTP gateway (Axum) for candidate ranking.
//!
//! One ranking endpoint at the root plus a liveness probe. CORS is
//! permissive on all routes.

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::rank_handler;
pub use state::HandlerState;

use crate::provider::{EmbeddingBackend, GenerationBackend};

/// Response header carrying the winning candidate's temperature label.
pub const TRIAD_TEMPERATURE_HEADER: &str = "x-triad-temperature";

pub fn create_router_with_state<G, E>(state: HandlerState<G, E>) -> Router
where
    G: GenerationBackend + Clone + Send + Sync + 'static,
    E: EmbeddingBackend + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/", post(rank_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    Json(HealthResponse { status: "ok" }).into_response()
}
