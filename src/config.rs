//! # Configuration Module
//!
//! Resolves where the emotion history lives and which Spotify credentials to
//! use.
//!
//! ## History Location
//!
//! By default the history is `emotion_history.json` in the working directory.
//! It can be moved with `--history-file` / `MOODTUNE_HISTORY_FILE`, or into the
//! platform data directory with `--data-dir`:
//! - Linux: `~/.local/share/moodtune/`
//! - macOS: `~/Library/Application Support/moodtune/`
//! - Windows: `%APPDATA%\moodtune\`
//!
//! ## Credentials
//!
//! Read from the environment after an optional `.env` file is loaded:
//!
//! | Variable                | Fallback                |
//! |-------------------------|-------------------------|
//! | `SPOTIFY_CLIENT_ID`     | `SPOTIPY_CLIENT_ID`     |
//! | `SPOTIFY_CLIENT_SECRET` | `SPOTIPY_CLIENT_SECRET` |
//! | `SPOTIFY_REDIRECT_URI`  | `SPOTIPY_REDIRECT_URI`  |
//! | `SPOTIFY_ACCESS_TOKEN`  |                         |
//! | `SPOTIFY_REFRESH_TOKEN` |                         |

use anyhow::{Context, Result};
use log::{debug, info};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;
use crate::history::DEFAULT_HISTORY_FILE;

const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Returns the platform data directory for Moodtune, creating it if needed.
///
/// # Errors
///
/// Fails if the platform has no data directory or it cannot be created.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let moodtune_dir = data_dir.join("moodtune");
    fs::create_dir_all(&moodtune_dir).with_context(|| {
        format!(
            "Failed to create Moodtune data directory at {}. Please check file permissions.",
            moodtune_dir.display()
        )
    })?;

    Ok(moodtune_dir)
}

/// Loads `.env` (or `path`) into the process environment.
///
/// A missing default `.env` is fine; a missing explicit file is an error.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load environment file {}", path.display()))?;
            info!("Loaded environment from {}", path.display());
        }
        None => match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {e}"),
        },
    }
    Ok(())
}

/// Application credentials and any pre-issued tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SpotifyCredentials {
    /// Reads credentials through `lookup`, which makes the resolution order
    /// testable without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |primary: &str, fallback: &str| {
            lookup(primary)
                .or_else(|| lookup(fallback))
                .filter(|v| !v.trim().is_empty())
        };
        let token = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            client_id: var("SPOTIFY_CLIENT_ID", "SPOTIPY_CLIENT_ID").unwrap_or_default(),
            client_secret: var("SPOTIFY_CLIENT_SECRET", "SPOTIPY_CLIENT_SECRET")
                .unwrap_or_default(),
            redirect_uri: var("SPOTIFY_REDIRECT_URI", "SPOTIPY_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            access_token: token("SPOTIFY_ACCESS_TOKEN"),
            refresh_token: token("SPOTIFY_REFRESH_TOKEN"),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

/// Configuration for runtime behavior
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Path to the emotion history file
    pub history_path: PathBuf,
    pub credentials: SpotifyCredentials,
    pub http_timeout: Duration,
}

impl RuntimeConfig {
    /// Resolves the configuration from parsed arguments and the environment.
    ///
    /// Call [`load_env_file`] first so `.env` values are visible.
    pub fn from_args(args: &Args) -> Result<Self> {
        let history_path = resolve_history_path(args.history_file.as_deref(), args.data_dir)?;
        info!("Using history file {}", history_path.display());

        Ok(Self {
            history_path,
            credentials: SpotifyCredentials::from_env(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        })
    }
}

/// Explicit path wins, then the data directory, then the working directory.
pub fn resolve_history_path(explicit: Option<&Path>, use_data_dir: bool) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if use_data_dir {
        return Ok(get_data_dir()?.join(DEFAULT_HISTORY_FILE));
    }
    Ok(PathBuf::from(DEFAULT_HISTORY_FILE))
}
