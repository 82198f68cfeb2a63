//! API error handling.
//!
//! Failures reach the page as `{"error": <message>}`; that shape is part of
//! the page contract. Messages carry enough upstream status/body to diagnose
//! a failure; credentials and tokens never appear in them.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use spotify_playlist::PlaylistError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API error type that can be converted to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The playlist endpoint's missing-secrets error.
    pub fn configuration() -> Self {
        Self::internal(
            "Spotify API credentials or Playlist ID not configured in environment variables.",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<PlaylistError> for ApiError {
    fn from(err: PlaylistError) -> Self {
        if err.is_configuration() {
            return ApiError::configuration();
        }

        tracing::error!("Error in playlist fetch: {}", err);
        ApiError::internal(format!("Failed to fetch Spotify playlist. {}", err))
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
