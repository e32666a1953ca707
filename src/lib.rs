//! Log moods, keep their history, and get a Spotify playlist for each one.
//!
//! Core modules:
//! - [`history`] - JSON emotion log
//! - [`stats`] - Counts, percentages and recent entries
//! - [`playback`] - Currently playing track and its audio features
//! - [`playlist`] - Mood → playlist recommendation
//! - [`menu`] - Interactive loop tying the above together
//!
//! ### Supporting Modules
//!
//! - [`emotion`] - Supported moods and the playlist catalog
//! - [`spotify`] - [`MusicService`](spotify::MusicService) trait and the Web API client
//! - [`config`] - Credentials and history location
//! - [`cli`] - Command-line flags
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use moodtune::config::SpotifyCredentials;
//! use moodtune::emotion::EmotionCatalog;
//! use moodtune::history::HistoryStore;
//! use moodtune::menu::Menu;
//! use moodtune::spotify::SpotifyClient;
//! use std::time::Duration;
//!
//! let client = SpotifyClient::new(SpotifyCredentials::from_env(), Duration::from_secs(10))?;
//! let menu = Menu::new(client, EmotionCatalog::default(), HistoryStore::new("emotion_history.json"));
//!
//! let stdin = std::io::stdin();
//! menu.run(&mut stdin.lock(), &mut std::io::stdout())?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Service calls return [`ServiceError`](spotify::ServiceError) and separate
//! "nothing there" (`Ok(None)`) from "the call failed". Everything else uses
//! `anyhow::Result`. Inside the menu, failures are printed and the loop goes on.

pub mod cli;
pub mod config;
pub mod emotion;
pub mod history;
pub mod menu;
pub mod playback;
pub mod playlist;
pub mod spotify;
pub mod stats;
