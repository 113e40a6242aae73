//! Tests for the gateway surface: request validation, response shape,
//! error mapping, and provider call accounting.

use std::time::Duration;

use axum::{Router, body::Body, http::Request, http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::gateway::error::GatewayError;
use crate::gateway::handler::{extract_prompt, map_ranking_error};
use crate::gateway::{HandlerState, TRIAD_TEMPERATURE_HEADER, create_router_with_state};
use crate::provider::{MockProvider, ProviderError};
use crate::ranking::{CandidateRanker, RankingError};
use crate::registry::Registry;

/// Mock scripted for the default registry: "A" wins the tie-break
/// ([[1,0],[0,1],[1,1]] against query [1,0] scores [1,0,1]).
fn scripted_provider() -> MockProvider {
    let provider = MockProvider::new();
    provider.push_generation("A");
    provider.push_generation("B");
    provider.push_generation("C");
    provider.set_embedding("A", vec![1.0, 0.0]);
    provider.set_embedding("B", vec![0.0, 1.0]);
    provider.set_embedding("C", vec![1.0, 1.0]);
    provider.set_query_embedding(vec![1.0, 0.0]);
    provider
}

fn test_router(provider: &MockProvider) -> Router {
    let ranker = CandidateRanker::new(provider.clone(), provider.clone(), Registry::default());
    let state = HandlerState::new(ranker, Duration::from_secs(30));
    create_router_with_state(state)
}

async fn send_rank_request(router: &Router, body: &str) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

mod rank_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_success_returns_winning_text_as_plain_text() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let response = send_rank_request(&router, r#"{"prompt": "what is up"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        assert_eq!(body_string(response).await, "A");
    }

    #[tokio::test]
    async fn test_success_reports_winning_temperature_header() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let response = send_rank_request(&router, r#"{"prompt": "what is up"}"#).await;

        let label = response
            .headers()
            .get(TRIAD_TEMPERATURE_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(label, "0.5");
    }

    #[tokio::test]
    async fn test_success_issues_seven_provider_calls() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        send_rank_request(&router, r#"{"prompt": "what is up"}"#).await;

        assert_eq!(provider.generation_calls(), vec![0.5, 0.75, 1.0]);
        assert_eq!(provider.document_calls().len(), 3);
        assert_eq!(provider.query_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_prompt_is_400_with_no_provider_calls() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let response = send_rank_request(&router, "{}").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("prompt"));
        assert_eq!(body["code"], 400);
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_non_string_prompt_is_400() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let response = send_rank_request(&router, r#"{"prompt": 42}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_400() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let response = send_rank_request(&router, r#"{"prompt": ""}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_400() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let response = send_rank_request(&router, "{not json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_is_502_without_winner() {
        let provider = scripted_provider();
        provider.fail_generation_at(1);
        let router = test_router(&provider);

        let response = send_rank_request(&router, r#"{"prompt": "what is up"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["code"], 502);
        // The raw provider error never reaches the caller.
        assert!(!body["error"].as_str().unwrap().contains("mock"));
    }

    #[tokio::test]
    async fn test_embedding_failure_is_502() {
        let provider = scripted_provider();
        provider.fail_embedding();
        let router = test_router(&provider);

        let response = send_rank_request(&router, r#"{"prompt": "what is up"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_cors_preflight_allowed() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/")
            .header("Origin", "https://example.com")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let provider = scripted_provider();
        let router = test_router(&provider);

        let request = Request::builder()
            .method("GET")
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
    }
}

mod extract_prompt_tests {
    use super::*;

    #[test]
    fn test_valid_prompt() {
        let body = serde_json::json!({"prompt": "hello"});
        assert_eq!(extract_prompt(&body).unwrap(), "hello");
    }

    #[test]
    fn test_missing_prompt_field() {
        let body = serde_json::json!({});
        let err = extract_prompt(&body).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[test]
    fn test_null_prompt() {
        let body = serde_json::json!({"prompt": null});
        assert!(extract_prompt(&body).is_err());
    }

    #[test]
    fn test_empty_prompt() {
        let body = serde_json::json!({"prompt": ""});
        let err = extract_prompt(&body).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let body = serde_json::json!({"prompt": "hello", "other": true});
        assert_eq!(extract_prompt(&body).unwrap(), "hello");
    }
}

mod error_mapping_tests {
    use super::*;

    fn provider_err() -> ProviderError {
        ProviderError::Api {
            status: 500,
            message: "secret upstream detail".to_string(),
        }
    }

    #[test]
    fn test_generation_error_maps_to_upstream() {
        let mapped = map_ranking_error(RankingError::Generation(provider_err()));
        assert!(matches!(mapped, GatewayError::Upstream(_)));
        assert!(!mapped.to_string().contains("secret"));
    }

    #[test]
    fn test_embedding_error_maps_to_upstream() {
        let mapped = map_ranking_error(RankingError::Embedding(provider_err()));
        assert!(matches!(mapped, GatewayError::Upstream(_)));
    }

    #[test]
    fn test_dimension_mismatch_maps_to_internal() {
        let mapped = map_ranking_error(RankingError::DimensionMismatch {
            expected: 2,
            actual: 3,
        });
        assert!(matches!(mapped, GatewayError::Internal(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_response_shape() {
        let response = GatewayError::InvalidRequest("bad input".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("bad input"));
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_deadline_response_is_504() {
        let response = GatewayError::DeadlineExceeded.into_response();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["code"], 504);
    }

    #[tokio::test]
    async fn test_internal_response_is_500() {
        let response = GatewayError::Internal("selection failed".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
