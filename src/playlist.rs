//! Turns a mood into a playlist recommendation.
//!
//! The playlist id comes from the [`EmotionCatalog`]; name, description and the
//! leading tracks come from the streaming service.

use log::{info, warn};
use std::io::{self, Write};

use crate::emotion::{Emotion, EmotionCatalog};
use crate::spotify::{MusicService, Playlist, Track, MARKET_FROM_TOKEN};

/// Only the first this-many playlist positions are shown.
pub const TRACK_WINDOW: usize = 10;

const NO_DESCRIPTION: &str = "No description";

/// Tracks among the first [`TRACK_WINDOW`] positions, paired with their
/// 1-based position. Empty positions are dropped, not back-filled.
pub fn visible_tracks(playlist: &Playlist) -> Vec<(usize, &Track)> {
    playlist
        .tracks
        .items
        .iter()
        .take(TRACK_WINDOW)
        .enumerate()
        .filter_map(|(i, item)| item.track.as_ref().map(|track| (i + 1, track)))
        .collect()
}

fn description(playlist: &Playlist) -> &str {
    match playlist.description.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => NO_DESCRIPTION,
    }
}

/// Fetches the playlist for `emotion` and prints the recommendation.
///
/// Service failures are reported on `out`; only I/O errors are returned.
pub fn resolve_and_fetch<S, W>(
    service: &S,
    catalog: &EmotionCatalog,
    emotion: Emotion,
    out: &mut W,
) -> io::Result<()>
where
    S: MusicService,
    W: Write,
{
    let Some(recommendation) = catalog.get(emotion) else {
        warn!("Catalog has no playlist for {emotion}");
        writeln!(out, "\nNo playlist configured for {emotion}")?;
        return Ok(());
    };

    info!(
        "Fetching playlist {} for {emotion}",
        recommendation.playlist_id
    );
    let playlist = match service.playlist(&recommendation.playlist_id, MARKET_FROM_TOKEN) {
        Ok(playlist) => playlist,
        Err(e) => {
            warn!("Playlist request failed: {e}");
            writeln!(out, "Error accessing playlist: {e}")?;
            return Ok(());
        }
    };

    writeln!(out, "\n{}", recommendation.message)?;
    writeln!(out, "🎵 Playlist: {}", playlist.name)?;
    writeln!(out, "📝 Description: {}", description(&playlist))?;
    writeln!(out, "🎶 Total tracks: {}", playlist.tracks.total)?;

    writeln!(out, "\n🎶 Top {TRACK_WINDOW} songs:")?;
    for (position, track) in visible_tracks(&playlist) {
        writeln!(
            out,
            "  {position}. {} - {}",
            track.name,
            track.primary_artist().unwrap_or("Unknown artist")
        )?;
    }
    Ok(())
}
