//! Wire models for the playlist-tracks payload and the reshaped display
//! record.

use serde::{Deserialize, Serialize};

/// Art shown when an album carries no images.
pub const DEFAULT_ALBUM_ART: &str = "images/default_album_art.png";

/// Display-ready track record served to the page.
///
/// `artist` joins multiple artist names with `", "`. `preview_url` stays
/// `null` on the wire when absent so the page can skip the preview control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub album_art: String,
    pub spotify_url: String,
    pub preview_url: Option<String>,
}

impl Track {
    /// Reshape one playlist item. Items without a track object (removed or
    /// local files) are dropped entirely, never emitted as placeholders.
    pub fn from_item(item: PlaylistItem) -> Option<Self> {
        let track = item.track?;

        let artist = track
            .artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let album_art = track
            .album
            .images
            .into_iter()
            .next()
            .map(|image| image.url)
            .unwrap_or_else(|| DEFAULT_ALBUM_ART.to_string());

        Some(Self {
            name: track.name,
            artist,
            album_art,
            spotify_url: track.external_urls.spotify,
            preview_url: track.preview_url,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaylistTracksResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

impl PlaylistTracksResponse {
    /// Reshape every item, dropping the trackless ones.
    pub fn into_tracks(self) -> Vec<Track> {
        self.items.into_iter().filter_map(Track::from_item).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub struct TrackObject {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Album,
    pub external_urls: ExternalUrls,
    pub preview_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
