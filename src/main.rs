//! # Moodtune
//!
//! Log how you feel, keep a history of it, and get a Spotify playlist that
//! matches the mood.
//!
//! ## Architecture
//!
//! - `cli`: Command-line flags (history location, credentials file)
//! - `config`: Credential and path resolution
//! - `history`: JSON emotion log
//! - `stats`: Aggregates over the log
//! - `spotify`: Web API client
//! - `playback` / `playlist`: Current track and mood playlists
//! - `menu`: The interactive loop
//!
//! ## Usage
//!
//! ```bash
//! moodtune
//! RUST_LOG=debug moodtune --history-file moods.json
//! ```

use anyhow::Result;
use clap::Parser;
use log::{error, warn};
use std::io;

use moodtune::cli::Args;
use moodtune::config::{self, RuntimeConfig};
use moodtune::emotion::EmotionCatalog;
use moodtune::history::HistoryStore;
use moodtune::menu::Menu;
use moodtune::spotify::SpotifyClient;

const INTERRUPT_FAREWELL: &str = "\n\n Goodbye! Take care <3";

/// Main entry point.
///
/// Any error escaping the session, and Ctrl+C, end with a friendly line
/// instead of a trace. Logging is controlled with `RUST_LOG`.
fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = ctrlc::set_handler(|| {
        println!("{INTERRUPT_FAREWELL}");
        std::process::exit(0);
    }) {
        warn!("Could not install Ctrl+C handler: {e}");
    }

    if let Err(e) = run(&args) {
        error!("Session ended with error: {e:?}");
        println!("\n An error occurred: {e:#}");
    }
}

fn run(args: &Args) -> Result<()> {
    config::load_env_file(args.env_file.as_deref())?;
    let config = RuntimeConfig::from_args(args)?;

    let client = SpotifyClient::new(config.credentials, config.http_timeout)?;
    let menu = Menu::new(
        client,
        EmotionCatalog::default(),
        HistoryStore::new(config.history_path),
    );

    // Stdout stays unlocked so the Ctrl+C handler can still print.
    let stdin = io::stdin();
    menu.run(&mut stdin.lock(), &mut io::stdout())
}
