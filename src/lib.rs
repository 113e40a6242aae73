//! Triad library crate (used by the server binary and integration tests).
//!
//! Triad answers a prompt by fanning it out to a generative-AI provider once
//! per registered sampling configuration, embedding every candidate together
//! with the prompt, and returning the candidate whose embedding has the
//! highest dot product with the prompt's embedding.
//!
//! # Module map
//!
//! - [`config`] - environment-backed server configuration
//! - [`registry`] - fixed generation configurations and safety settings
//! - [`provider`] - typed clients for the generation and embedding endpoints
//! - [`ranking`] - sequential candidate generation, embedding, and selection
//! - [`gateway`] - Axum HTTP surface
//!
//! Mock provider backends are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod gateway;
pub mod provider;
pub mod ranking;
pub mod registry;

pub use config::{Config, ConfigError};
pub use gateway::{HandlerState, TRIAD_TEMPERATURE_HEADER, create_router_with_state};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockProvider;
pub use provider::{EmbeddingBackend, GeminiClient, GenerationBackend, ProviderError};
pub use ranking::{Candidate, CandidateRanker, Ranked, RankingError, dot_product, select_best};
pub use registry::{GenerationConfig, HarmBlockThreshold, HarmCategory, Registry, SafetySetting};
