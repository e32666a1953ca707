//! # Emotion Module
//!
//! The closed set of moods Moodtune understands, how free-text input is
//! normalized into one of them, and the static catalog that pairs each mood
//! with a Spotify playlist and a short message.
//!
//! ## Normalization
//!
//! Input is trimmed and title-cased (first letter upper, rest lower) before it
//! is matched, so `"  sAD "` becomes [`Emotion::Sad`] while `"Furious"` is
//! rejected.
//!
//! ```
//! use moodtune::emotion::Emotion;
//!
//! assert_eq!(Emotion::parse("  sAD "), Some(Emotion::Sad));
//! assert_eq!(Emotion::parse("Furious"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported mood category.
///
/// Serialized with its display name (`"Happy"`, `"Sad"`, ...) so the history
/// file stays human readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Overwhelmed,
    Worse,
}

impl Emotion {
    /// Every label, in menu order.
    pub const ALL: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Overwhelmed,
        Emotion::Worse,
    ];

    /// Display name, also used as the history-file value.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Angry => "Angry",
            Emotion::Overwhelmed => "Overwhelmed",
            Emotion::Worse => "Worse",
        }
    }

    /// Normalizes `input` and matches it against the label set.
    ///
    /// Returns `None` for anything outside the set, including the empty string.
    pub fn parse(input: &str) -> Option<Emotion> {
        let normalized = normalize(input);
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.as_str() == normalized)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trims whitespace and title-cases the remainder.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Human readable list for prompts: `Happy/Sad/Angry/Overwhelmed/Worse`.
pub fn label_list(separator: &str) -> String {
    Emotion::ALL
        .iter()
        .map(|e| e.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Playlist id and encouragement message for one mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub playlist_id: String,
    pub message: String,
}

/// Immutable mood → recommendation table.
///
/// Built once at startup and handed to whoever needs it. Tests can build their
/// own with [`EmotionCatalog::from_entries`].
#[derive(Debug, Clone)]
pub struct EmotionCatalog {
    entries: Vec<(Emotion, Recommendation)>,
}

impl EmotionCatalog {
    pub fn from_entries(entries: Vec<(Emotion, Recommendation)>) -> Self {
        Self { entries }
    }

    /// Recommendation for `emotion`, if the catalog has one.
    pub fn get(&self, emotion: Emotion) -> Option<&Recommendation> {
        self.entries
            .iter()
            .find(|(e, _)| *e == emotion)
            .map(|(_, rec)| rec)
    }
}

impl Default for EmotionCatalog {
    fn default() -> Self {
        let rec = |playlist_id: &str, message: &str| Recommendation {
            playlist_id: playlist_id.to_string(),
            message: message.to_string(),
        };

        Self::from_entries(vec![
            (
                Emotion::Happy,
                rec(
                    "5iR7JBR9Ot6ZPgs4GaPOm2",
                    "Here is a happy playlist just for you <3",
                ),
            ),
            (
                Emotion::Sad,
                rec(
                    "3Kd8XtyN0CmFVZ0SxJTi37",
                    "Here is a sad playlist just for you, hope you are doing better soon <3",
                ),
            ),
            (
                Emotion::Angry,
                rec(
                    "5ymqBA8vZSnPEZfDJeuhH1",
                    "Here is your angry playlist, please calm down a little !!",
                ),
            ),
            (
                Emotion::Overwhelmed,
                rec(
                    "1LWyQBS7lXGMvHg17m8udS",
                    "Here is a playlist to help you relax and feel better",
                ),
            ),
            (
                Emotion::Worse,
                rec(
                    "3vleBofUVfr7nfyYLgyPUZ",
                    "You just need to listen to some rock and rock your body. Here you go!!",
                ),
            ),
        ])
    }
}
