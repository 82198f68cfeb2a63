//! Playlist proxy route.
//!
//! The page fetches this once on load; the upstream exchange (token, then
//! tracks) happens per request and nothing is cached.

use axum::{Json, Router, extract::State, routing::get};
use spotify_playlist::Track;

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;

/// Create the playlist router.
pub fn router() -> Router<AppState> {
    Router::new().route("/playlist", get(get_playlist))
}

/// Fetch the configured playlist and return the reshaped track list.
async fn get_playlist(State(state): State<AppState>) -> ApiResult<Json<Vec<Track>>> {
    let Some(source) = &state.playlist else {
        // Credentials were missing at startup; fail without a network call.
        return Err(ApiError::configuration());
    };

    let tracks = source.fetch_tracks().await?;
    Ok(Json(tracks))
}
