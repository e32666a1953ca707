//! # Command-Line Interface Module
//!
//! Moodtune is interactive: every invocation opens the menu. The flags only
//! decide where data and credentials come from.
//!
//! ## Examples
//!
//! ```bash
//! moodtune
//! moodtune --history-file ~/notes/moods.json
//! moodtune --data-dir --env-file ~/.config/moodtune.env
//! RUST_LOG=debug moodtune
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "moodtune")]
#[command(about = "Moodtune: log how you feel, get a Spotify playlist for it")]
#[command(version)]
pub struct Args {
    /// Emotion history file
    ///
    /// Defaults to `emotion_history.json` in the current directory.
    #[arg(long, env = "MOODTUNE_HISTORY_FILE", value_hint = clap::ValueHint::FilePath)]
    pub history_file: Option<PathBuf>,

    /// Keep the history in the platform data directory
    ///
    /// Ignored when --history-file is given.
    #[arg(long)]
    pub data_dir: bool,

    /// Environment file with Spotify credentials
    ///
    /// Defaults to a `.env` file in the current directory or its parents,
    /// if one exists.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub env_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "moodtune",
            "--history-file",
            "/tmp/moods.json",
            "--env-file",
            "creds.env",
        ])
        .unwrap();
        assert_eq!(args.history_file, Some(PathBuf::from("/tmp/moods.json")));
        assert_eq!(args.env_file, Some(PathBuf::from("creds.env")));
        assert!(!args.data_dir);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Args::try_parse_from(["moodtune", "happy"]).is_err());
    }
}
