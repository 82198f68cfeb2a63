//! Spotify Web API client: client-credentials token exchange and a
//! field-selected playlist-tracks fetch.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::PlaylistError;
use crate::models::{PlaylistTracksResponse, TokenResponse, Track};

const ACCOUNTS_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Field selection keeping the payload to exactly what the page renders.
const TRACK_FIELDS: &str =
    "items(track(name,artists(name),album(images),external_urls(spotify),preview_url))";
const TRACK_LIMIT: u32 = 20;

/// Credentials for the client-credentials grant plus the playlist to serve.
/// Server-side only; never exposed to the page.
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub playlist_id: String,
}

impl SpotifyCredentials {
    /// Read the three required values from the environment. Any missing or
    /// empty value is a configuration error, reported before a single
    /// network call is made.
    pub fn from_env() -> Result<Self, PlaylistError> {
        Ok(Self {
            client_id: require_env("SPOTIFY_CLIENT_ID")?,
            client_secret: require_env("SPOTIFY_CLIENT_SECRET")?,
            playlist_id: require_env("SPOTIFY_PLAYLIST_ID")?,
        })
    }
}

fn require_env(name: &str) -> Result<String, PlaylistError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PlaylistError::MissingConfiguration),
    }
}

/// Source of display-ready tracks. The HTTP implementation lives behind this
/// seam so the server and its tests can swap in fakes.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_tracks(&self) -> Result<Vec<Track>, PlaylistError>;
}

/// Spotify-backed [`PlaylistSource`].
pub struct SpotifyClient {
    credentials: SpotifyCredentials,
    client: Client,
    accounts_url: String,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(credentials: SpotifyCredentials, client: Client) -> Self {
        Self {
            credentials,
            client,
            accounts_url: ACCOUNTS_TOKEN_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
        }
    }

    /// Point the client at alternate upstream endpoints. Test use only.
    pub fn with_base_urls(
        mut self,
        accounts_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        self.accounts_url = accounts_url.into();
        self.api_base = api_base.into();
        self
    }

    /// Form-encoded client-credentials grant with HTTP Basic auth.
    async fn request_token(&self) -> Result<String, PlaylistError> {
        let response = self
            .client
            .post(&self.accounts_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Spotify token request rejected");
            return Err(PlaylistError::TokenRequest {
                status: status.as_u16(),
                detail: upstream_detail(&body),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn request_tracks(&self, token: &str) -> Result<PlaylistTracksResponse, PlaylistError> {
        let url = format!(
            "{}/playlists/{}/tracks",
            self.api_base, self.credentials.playlist_id
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("fields", TRACK_FIELDS)])
            .query(&[("limit", TRACK_LIMIT)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!(status = %status, "Spotify playlist request rejected");
            return Err(PlaylistError::CatalogRequest {
                status: status.as_u16(),
                detail: upstream_detail(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PlaylistSource for SpotifyClient {
    async fn fetch_tracks(&self) -> Result<Vec<Track>, PlaylistError> {
        let token = self.request_token().await?;
        let payload = self.request_tracks(&token).await?;

        let tracks = payload.into_tracks();
        debug!(count = tracks.len(), "playlist reshaped");
        Ok(tracks)
    }
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorObject,
}

#[derive(Deserialize)]
struct ApiErrorObject {
    message: String,
}

#[derive(Deserialize)]
struct TokenErrorEnvelope {
    error: String,
    error_description: Option<String>,
}

/// Two-stage decode of an upstream error body: prefer the message inside
/// Spotify's error envelope (the Web API object shape, then the token
/// endpoint's flat shape), fall back to the raw body, and name the absence
/// of one explicitly.
fn upstream_detail(body: &str) -> String {
    if body.trim().is_empty() {
        return "no response body".to_string();
    }

    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        return envelope.error.message;
    }

    if let Ok(envelope) = serde_json::from_str::<TokenErrorEnvelope>(body) {
        return envelope.error_description.unwrap_or(envelope.error);
    }

    body.to_string()
}
