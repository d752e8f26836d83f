//! # Request Handlers
//!
//! Axum request handlers for both servers, plus the pieces they share:
//! the error body, the lenient JSON extractor, and the health check.

pub mod manual;
pub mod webhooks;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::PaymentError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Rejection type shared by all handlers
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn payment_error_to_response(err: PaymentError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), Json(response))
}

/// Log a failed gateway call and convert it into a response
pub(crate) fn gateway_error(operation: &'static str) -> impl Fn(PaymentError) -> ApiError {
    move |err| {
        error!("{} failed: {}", operation, err);
        payment_error_to_response(err)
    }
}

/// JSON request body decoded regardless of `Content-Type`.
///
/// Any body that does not decode is rejected with 500 and the decoder's
/// message.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            error!("Failed to read request body: {}", rejection);
            payment_error_to_response(PaymentError::Serialization(rejection.body_text()))
        })?;

        serde_json::from_slice(&body).map(JsonBody).map_err(|e| {
            error!("Failed to decode request body: {}", e);
            payment_error_to_response(PaymentError::Serialization(format!(
                "invalid request body: {}",
                e
            )))
        })
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "saving-card",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct CurrencyBody {
        currency: String,
    }

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_payment_error_conversion() {
        let (status, Json(body)) =
            payment_error_to_response(PaymentError::WebhookVerificationFailed("bad".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, 400);

        let (status, _) = payment_error_to_response(PaymentError::provider("stripe", "boom"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_json_body_ignores_content_type() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"currency":"usd"}"#))
            .unwrap();

        let JsonBody(body) = JsonBody::<CurrencyBody>::from_request(req, &()).await.unwrap();
        assert_eq!(body.currency, "usd");
    }

    #[tokio::test]
    async fn test_json_body_rejects_with_500() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from("{currency"))
            .unwrap();

        let (status, Json(body)) = JsonBody::<CurrencyBody>::from_request(req, &()).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.starts_with("Serialization error: invalid request body"));
    }
}
