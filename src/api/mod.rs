//! HTTP endpoints.
//!
//! Each endpoint carries its own CORS layer (any origin, `POST, OPTIONS`, a
//! per-endpoint header list) which answers every `OPTIONS` request; other methods
//! besides `POST` get a 405. Bodies are read as raw bytes and decoded here, so a
//! malformed payload surfaces as an [`AppError::Parse`] in the endpoint's own
//! error envelope.

mod analysis;
mod chat;
mod proxy;
mod webhook;

pub use analysis::*;
pub use chat::*;
pub use proxy::*;
pub use webhook::*;

use axum::http::{header, HeaderName, Method, StatusCode};
use serde::de::DeserializeOwned;
use tower_http::cors::{Any, CorsLayer};

use crate::errors::AppError;

const X_WEBHOOK_SIGNATURE: HeaderName = HeaderName::from_static("x-webhook-signature");
const X_CLIENT_INFO: HeaderName = HeaderName::from_static("x-client-info");
const APIKEY: HeaderName = HeaderName::from_static("apikey");

fn cors<const N: usize>(allow_headers: [HeaderName; N]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(allow_headers)
}

/// CORS for /storyblok-webhook
pub fn webhook_cors() -> CorsLayer {
    cors([header::CONTENT_TYPE, header::AUTHORIZATION, X_WEBHOOK_SIGNATURE])
}

/// CORS for /ai-content-analysis
pub fn analysis_cors() -> CorsLayer {
    cors([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// CORS for the browser-facing /storyblok-api and /ai-chat
pub fn client_cors() -> CorsLayer {
    cors([header::AUTHORIZATION, X_CLIENT_INFO, APIKEY, header::CONTENT_TYPE])
}

/// Any method other than POST or OPTIONS.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Decode a JSON request body.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Parse(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn ok() -> &'static str {
        "ok"
    }

    fn router() -> Router {
        Router::new().route(
            "/hook",
            post(ok).fallback(method_not_allowed).layer(webhook_cors()),
        )
    }

    #[tokio::test]
    async fn test_options_answered_by_cors_layer() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/hook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("POST") && methods.contains("OPTIONS"));

        let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("x-webhook-signature"));
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/hook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_parse_body_errors_are_parse_errors() {
        let err = parse_body::<Value>(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
