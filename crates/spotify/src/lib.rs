//! Spotify playlist integration for the anniversary page.
//!
//! One request/response cycle: exchange client credentials for a bearer
//! token, fetch a fixed playlist's tracks with a field selection, reshape
//! into display-ready records. Nothing is cached; every fetch is fresh.
//! Also hosts the single-flight preview playback controller.

pub mod client;
pub mod error;
pub mod models;
pub mod preview;

pub use client::{PlaylistSource, SpotifyClient, SpotifyCredentials};
pub use error::PlaylistError;
pub use models::{DEFAULT_ALBUM_ART, Track};
pub use preview::{ClipSink, ControlState, PlaybackError, PreviewPlayer};
