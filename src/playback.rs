//! What is playing right now, and how it "feels".
//!
//! A playing track is shown with its name and primary artist, followed by the
//! audio features Spotify computes for it (valence, energy, danceability,
//! tempo). A paused session shows no track identity at all.

use log::{debug, warn};
use std::io::{self, Write};

use crate::spotify::{AudioFeatures, MusicService, ServiceError, Track};

/// State of the account's player.
#[derive(Debug, Clone, PartialEq)]
pub enum NowPlaying {
    /// No session, or a session without a track (ads, unsupported items).
    Nothing,
    Paused,
    Playing(Track),
}

pub fn now_playing<S: MusicService>(service: &S) -> Result<NowPlaying, ServiceError> {
    let state = match service.current_playback()? {
        None => NowPlaying::Nothing,
        Some(playback) if !playback.is_playing => NowPlaying::Paused,
        Some(playback) => match playback.item {
            Some(track) => NowPlaying::Playing(track),
            None => NowPlaying::Nothing,
        },
    };
    debug!("Playback state: {state:?}");
    Ok(state)
}

/// `0.456` → `46`
///
/// Halves round away from zero (`0.125` → `13`, `0.625` → `63`), not to the
/// nearest even value the way `{:.0}` formatting does. Tempo is rounded the
/// same way.
pub fn as_percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Prints the current-track report.
///
/// Service failures are written as a single line; only I/O errors on `out`
/// are returned.
pub fn write_current_track<S, W>(service: &S, out: &mut W) -> io::Result<()>
where
    S: MusicService,
    W: Write,
{
    let track = match now_playing(service) {
        Ok(NowPlaying::Playing(track)) => track,
        Ok(NowPlaying::Paused) => {
            writeln!(out, "\n⏸️  Playback is paused, nothing is playing right now")?;
            return Ok(());
        }
        Ok(NowPlaying::Nothing) => {
            writeln!(out, "\n🎵 No track currently playing")?;
            return Ok(());
        }
        Err(e) => {
            warn!("Current playback request failed: {e}");
            writeln!(out, "Could not fetch current track: {e}")?;
            return Ok(());
        }
    };

    writeln!(out, "\n🎧 Currently playing:")?;
    writeln!(
        out,
        "  {} - {}",
        track.name,
        track.primary_artist().unwrap_or("Unknown artist")
    )?;

    let Some(track_id) = track.id.as_deref() else {
        debug!("Track {} has no id, skipping audio features", track.name);
        return Ok(());
    };

    match service.audio_features(track_id) {
        Ok(Some(features)) => write_features(&features, out),
        Ok(None) => Ok(()),
        Err(e) => {
            warn!("Audio features request failed for {track_id}: {e}");
            writeln!(out, "Could not fetch track mood analysis: {e}")
        }
    }
}

fn write_features<W: Write>(features: &AudioFeatures, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n📈 Track mood analysis:")?;
    writeln!(out, "  Happiness level: {}%", as_percent(features.valence))?;
    writeln!(out, "  Energy level: {}%", as_percent(features.energy))?;
    writeln!(
        out,
        "  Danceability: {}%",
        as_percent(features.danceability)
    )?;
    writeln!(out, "  Tempo: {} BPM", features.tempo.round() as i64)
}
