//! # History Module
//!
//! Persists every logged emotion to a single JSON file. The whole file is read
//! on each access and rewritten on each append; there is no partial I/O and no
//! locking, so the last writer wins.
//!
//! ## File Format
//!
//! ```json
//! [
//!   {
//!     "emotion": "Happy",
//!     "timestamp": "2024-05-01 18:42:07",
//!     "date": "2024-05-01",
//!     "time": "18:42"
//!   }
//! ]
//! ```
//!
//! A missing or unreadable file is treated as an empty history.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::emotion::Emotion;

/// Default file name, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "emotion_history.json";

/// One logged emotion.
///
/// `emotion` is kept as the stored string rather than [`Emotion`] so a
/// hand-edited file with an unknown label still loads instead of being
/// discarded (and then overwritten) as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub emotion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub date: String,
    pub time: String,
}

impl HistoryEntry {
    pub fn new(emotion: Emotion, at: NaiveDateTime) -> Self {
        Self {
            emotion: emotion.as_str().to_string(),
            timestamp: Some(at.format("%Y-%m-%d %H:%M:%S").to_string()),
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M").to_string(),
        }
    }

    /// Timestamp for display, falling back to `date time` for older entries.
    pub fn display_timestamp(&self) -> String {
        match &self.timestamp {
            Some(ts) => ts.clone(),
            None => format!("{} {}", self.date, self.time),
        }
    }
}

/// File-backed emotion log.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full log.
    ///
    /// Never fails: an absent file or content that is not a JSON array of
    /// entries yields an empty vector.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No history at {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Ignoring malformed history file {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Appends one entry stamped with `at` and rewrites the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be written. The previous content may be lost if the process dies
    /// mid-write.
    pub fn append(&self, emotion: Emotion, at: NaiveDateTime) -> Result<HistoryEntry> {
        let mut history = self.load();
        let entry = HistoryEntry::new(emotion, at);
        history.push(entry.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create history directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&history)
            .context("Failed to serialize emotion history")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history file {}", self.path.display()))?;

        debug!(
            "Saved {} to {} ({} entries)",
            entry.emotion,
            self.path.display(),
            history.len()
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(HistoryStore::new(&path).load().is_empty());

        fs::write(&path, r#"{"emotion": "Happy"}"#).unwrap();
        assert!(HistoryStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_append_creates_file_and_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        store.append(Emotion::Happy, at(9, 5, 1)).unwrap();
        store.append(Emotion::Sad, at(12, 30, 0)).unwrap();
        store.append(Emotion::Angry, at(23, 59, 59)).unwrap();

        let history = store.load();
        let labels: Vec<_> = history.iter().map(|e| e.emotion.as_str()).collect();
        assert_eq!(labels, vec!["Happy", "Sad", "Angry"]);
        assert_eq!(history[0].date, "2024-05-01");
        assert_eq!(history[0].time, "09:05");
        assert_eq!(history[2].timestamp.as_deref(), Some("2024-05-01 23:59:59"));
    }

    #[test]
    fn test_append_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("nested/deeper/history.json"));
        store.append(Emotion::Worse, at(1, 2, 3)).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_file_is_pretty_printed_with_two_spaces() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        store.append(Emotion::Overwhelmed, at(8, 0, 0)).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"emotion\": \"Overwhelmed\""));
    }

    #[test]
    fn test_loads_entries_without_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[{"emotion": "Sad", "date": "2023-01-02", "time": "07:15"}]"#,
        )
        .unwrap();

        let history = HistoryStore::new(&path).load();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].timestamp, None);
        assert_eq!(history[0].display_timestamp(), "2023-01-02 07:15");
    }

    #[test]
    fn test_append_keeps_unknown_labels_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[{"emotion": "Café", "date": "2023-01-02", "time": "07:15"}]"#,
        )
        .unwrap();

        let store = HistoryStore::new(&path);
        store.append(Emotion::Happy, at(10, 0, 0)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Café"), "non-ASCII must stay unescaped");
        assert_eq!(store.load().len(), 2);
    }
}
