//! Subset of the Spotify Web API payloads Moodtune reads.
//!
//! Only the fields that are displayed are modelled; everything else in the
//! responses is ignored by serde.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    /// Absent for local files.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl Track {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

/// `GET /me/player`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Playback {
    #[serde(default)]
    pub is_playing: bool,
    /// Null during ads and for item types Moodtune does not request.
    #[serde(default)]
    pub item: Option<Track>,
}

/// `GET /audio-features/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioFeatures {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub tempo: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaylistTracks {
    pub total: u32,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

/// `GET /playlists/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub tracks: PlaylistTracks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_with_null_tracks_and_extra_fields() {
        let json = r#"{
            "name": "Rainy Day",
            "description": null,
            "followers": {"total": 12},
            "tracks": {
                "total": 3,
                "href": "ignored",
                "items": [
                    {"added_at": "x", "track": {"id": "a", "name": "One", "artists": [{"name": "Ann"}, {"name": "Bo"}]}},
                    {"track": null},
                    {"track": {"id": null, "name": "Local", "artists": []}}
                ]
            }
        }"#;
        let playlist: Playlist = serde_json::from_str(json).unwrap();

        assert_eq!(playlist.name, "Rainy Day");
        assert_eq!(playlist.description, None);
        assert_eq!(playlist.tracks.total, 3);
        assert_eq!(playlist.tracks.items.len(), 3);
        assert!(playlist.tracks.items[1].track.is_none());

        let first = playlist.tracks.items[0].track.as_ref().unwrap();
        assert_eq!(first.primary_artist(), Some("Ann"));
        let local = playlist.tracks.items[2].track.as_ref().unwrap();
        assert_eq!(local.id, None);
        assert_eq!(local.primary_artist(), None);
    }

    #[test]
    fn test_playback_without_item() {
        let json = r#"{"is_playing": true, "item": null, "currently_playing_type": "ad"}"#;
        let playback: Playback = serde_json::from_str(json).unwrap();
        assert!(playback.is_playing);
        assert!(playback.item.is_none());
    }

    #[test]
    fn test_audio_features() {
        let features: AudioFeatures = serde_json::from_str(
            r#"{"valence": 0.456, "energy": 0.9, "danceability": 0.5, "tempo": 119.6, "key": 5}"#,
        )
        .unwrap();
        assert_eq!(features.tempo, 119.6);
    }
}
