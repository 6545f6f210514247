//! API error taxonomy and its mapping onto HTTP responses.
//!
//! Every error this service produces itself is serialized as
//! `{"detail": "..."}` with the status code that matches its class:
//! download problems are the client's fault (400), a bad URL is a
//! validation failure (422), and anything the engine throws is ours (500).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The image could not be fetched from the given URL.
    #[error("could not download image from URL: {0}")]
    Download(String),

    /// The request carried a missing or malformed image URL.
    #[error("invalid image URL: {0}")]
    InvalidUrl(String),

    /// The recognition engine failed or returned malformed data.
    #[error("OCR processing error: {0}")]
    Recognition(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Download(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidUrl(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Recognition(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        (self.status(), Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
