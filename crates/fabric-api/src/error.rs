//! API error types.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;

/// Failures while serving an endpoint.
///
/// Clients only ever see a fixed message per endpoint; the underlying cause
/// goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to read new product data: {0}")]
    NewProducts(String),

    #[error("Failed to load images: {0}")]
    AboutImages(String),
}

impl ApiError {
    /// Message returned in the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::NewProducts(_) => "Failed to read new product data",
            ApiError::AboutImages(_) => "Failed to load images",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        let body = json!({ "error": self.public_message() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
