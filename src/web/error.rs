//! HTTP error handling.
//!
//! Errors are answered as short plain-text bodies, matching what the form
//! users see in their browser.

use crate::error::MemeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Shown for every failure caused by the submitted image, without server paths.
pub const IMAGE_FETCH_FAILED: &str = "Error getting the image";

/// Web-facing error.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create meme.").into_response()
            }
        }
    }
}

impl From<MemeError> for ApiError {
    fn from(e: MemeError) -> Self {
        match e {
            MemeError::InvalidInput { .. }
            | MemeError::DownloadFailed { .. }
            | MemeError::DownloadTimeout { .. }
            | MemeError::ImageDecode { .. }
            | MemeError::ImageTooLarge { .. } => {
                tracing::warn!(error = %e, "Rejected image");
                ApiError::BadRequest(IMAGE_FETCH_FAILED.into())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
