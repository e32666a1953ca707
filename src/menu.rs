//! # Interactive Menu
//!
//! The top-level loop users interact with:
//!
//! ```text
//! 1. Log my emotion & get playlist   → history::append, playlist::resolve_and_fetch
//! 2. Show my emotion statistics      → stats::write_report
//! 3. What am I listening to now?     → playback::write_current_track
//! 4. Exit
//! ```
//!
//! Every action returns to the menu except Exit. Failures inside an action are
//! printed and the loop continues; end of input behaves like Exit.
//!
//! The loop is generic over its input, output and [`MusicService`], so it can
//! be driven end-to-end with in-memory buffers and a fake service.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use log::{debug, error, info};
use std::io::{BufRead, Write};

use crate::emotion::{label_list, Emotion, EmotionCatalog};
use crate::history::HistoryStore;
use crate::spotify::MusicService;
use crate::{playback, playlist, stats};

pub const FAREWELL: &str = "\n Take care! See you soon <3";

/// A top-level menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    LogEmotion,
    ShowStats,
    CurrentTrack,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::LogEmotion),
            "2" => Some(MenuChoice::ShowStats),
            "3" => Some(MenuChoice::CurrentTrack),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Outcome of one "log emotion" attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    Logged(Emotion),
    Rejected,
    /// The history write failed, so no playlist was fetched.
    SaveFailed,
    /// Input ended at the prompt.
    Closed,
}

type Clock = Box<dyn Fn() -> NaiveDateTime>;

pub struct Menu<S> {
    service: S,
    catalog: EmotionCatalog,
    history: HistoryStore,
    clock: Clock,
}

impl<S: MusicService> Menu<S> {
    pub fn new(service: S, catalog: EmotionCatalog, history: HistoryStore) -> Self {
        Self {
            service,
            catalog,
            history,
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Replaces the wall clock used to stamp history entries.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Runs until the user picks Exit or input ends.
    ///
    /// # Errors
    ///
    /// Only I/O failures on `input`/`out` end the loop with an error.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        info!("Starting interactive menu");
        loop {
            write_menu(out)?;
            let Some(line) = prompt(input, out, "\nChoose an option (1-4): ")? else {
                debug!("Input closed at menu prompt");
                writeln!(out, "{FAREWELL}")?;
                return Ok(());
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::LogEmotion) => {
                    if self.log_emotion(input, out)? == LogOutcome::Closed {
                        writeln!(out, "{FAREWELL}")?;
                        return Ok(());
                    }
                }
                Some(MenuChoice::ShowStats) => {
                    stats::write_report(&self.history.load(), out)?;
                }
                Some(MenuChoice::CurrentTrack) => {
                    playback::write_current_track(&self.service, out)?;
                }
                Some(MenuChoice::Exit) => {
                    writeln!(out, "{FAREWELL}")?;
                    info!("User exited");
                    return Ok(());
                }
                None => {
                    writeln!(out, "\n Invalid option. Please choose 1-4")?;
                }
            }
        }
    }

    /// Prompts for a mood, records it and shows the matching playlist.
    ///
    /// The playlist is only fetched once the entry is on disk.
    pub fn log_emotion<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<LogOutcome> {
        let question = format!("\nHow are you feeling right now? ({}): ", label_list("/"));
        let Some(raw) = prompt(input, out, &question)? else {
            return Ok(LogOutcome::Closed);
        };

        let Some(emotion) = Emotion::parse(&raw) else {
            debug!("Rejected emotion input {raw:?}");
            writeln!(
                out,
                "\n Invalid emotion. Please choose: Happy, Sad, Angry, Overwhelmed, or Worse"
            )?;
            return Ok(LogOutcome::Rejected);
        };

        if let Err(e) = self.history.append(emotion, (self.clock)()) {
            error!("Saving emotion failed: {e:#}");
            writeln!(out, "Could not save emotion: {e:#}")?;
            return Ok(LogOutcome::SaveFailed);
        }
        writeln!(out, "✓ Emotion saved to history!")?;

        playlist::resolve_and_fetch(&self.service, &self.catalog, emotion, out)?;
        Ok(LogOutcome::Logged(emotion))
    }
}

fn write_menu<W: Write>(out: &mut W) -> Result<()> {
    let rule = "=".repeat(50);
    writeln!(out, "\n{rule}")?;
    writeln!(out, " MOODTUNE: SPOTIFY EMOTION TRACKER ")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "\n1. Log my emotion & get playlist")?;
    writeln!(out, "2. Show my emotion statistics")?;
    writeln!(out, "3. What am I listening to now?")?;
    writeln!(out, "4. Exit")?;
    Ok(())
}

/// Writes `question`, then reads one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::LogEmotion));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::ShowStats));
        assert_eq!(MenuChoice::parse("3\n"), Some(MenuChoice::CurrentTrack));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_prompt_handles_eof_and_line_endings() {
        let mut out = Vec::new();

        let mut input: &[u8] = b"  sAD \r\n";
        let line = prompt(&mut input, &mut out, "? ").unwrap();
        assert_eq!(line.as_deref(), Some("  sAD "));

        let mut empty: &[u8] = b"";
        assert_eq!(prompt(&mut empty, &mut out, "? ").unwrap(), None);
        assert_eq!(String::from_utf8(out).unwrap(), "? ? ");
    }
}
