//! Playlist pipeline errors.

use thiserror::Error;

/// Errors from the playlist fetch pipeline.
///
/// Upstream status and body are carried verbatim for diagnostics; bearer
/// tokens and client credentials never appear in any variant.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Spotify API credentials or Playlist ID not configured")]
    MissingConfiguration,
    #[error("Spotify Token API Error: {status} - {detail}")]
    TokenRequest { status: u16, detail: String },
    #[error("Spotify Playlist API Error: {status} - {detail}")]
    CatalogRequest { status: u16, detail: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlaylistError {
    /// Whether the failure is a deployment problem rather than an upstream
    /// one.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingConfiguration)
    }
}
