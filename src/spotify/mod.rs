//! # Spotify Module
//!
//! The boundary between Moodtune and the streaming service.
//!
//! [`MusicService`] is the only thing the rest of the crate depends on, so the
//! menu, playback inspector and playlist resolver can all be exercised against
//! an in-memory fake. [`SpotifyClient`] is the real implementation, talking to
//! the Spotify Web API over blocking HTTP.
//!
//! ## Results
//!
//! Every call distinguishes "the service answered with nothing" (`Ok(None)`)
//! from "the call failed" (`Err(ServiceError)`):
//!
//! | Call                 | Nothing                 | Failure                    |
//! |----------------------|-------------------------|----------------------------|
//! | `current_playback`   | no active device (204)  | network, auth, bad payload |
//! | `audio_features`     | unknown track (404)     | network, auth, bad payload |
//! | `playlist`           | n/a                     | network, auth, bad payload |

pub mod client;
pub mod models;

pub use client::SpotifyClient;
pub use models::{Artist, AudioFeatures, Playback, Playlist, PlaylistItem, PlaylistTracks, Track};

use thiserror::Error;

/// OAuth scopes requested for the authorization-code flow.
pub const SCOPES: &str =
    "playlist-read-private user-read-currently-playing user-read-recently-played user-top-read";

/// Market resolved from the user's token.
pub const MARKET_FROM_TOKEN: &str = "from_token";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not authorized with Spotify; authorize at {authorize_url} and set SPOTIFY_ACCESS_TOKEN or SPOTIFY_REFRESH_TOKEN")]
    NotAuthorized { authorize_url: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response from Spotify: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only view of a streaming account.
pub trait MusicService {
    /// What the account is playing right now, if anything.
    fn current_playback(&self) -> Result<Option<Playback>, ServiceError>;

    fn audio_features(&self, track_id: &str) -> Result<Option<AudioFeatures>, ServiceError>;

    fn playlist(&self, playlist_id: &str, market: &str) -> Result<Playlist, ServiceError>;
}

impl<T: MusicService + ?Sized> MusicService for &T {
    fn current_playback(&self) -> Result<Option<Playback>, ServiceError> {
        (**self).current_playback()
    }

    fn audio_features(&self, track_id: &str) -> Result<Option<AudioFeatures>, ServiceError> {
        (**self).audio_features(track_id)
    }

    fn playlist(&self, playlist_id: &str, market: &str) -> Result<Playlist, ServiceError> {
        (**self).playlist(playlist_id, market)
    }
}
