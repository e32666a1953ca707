//! Aggregate statistics over the emotion history.
//!
//! Computation ([`summarize`]) is kept apart from console output
//! ([`write_report`]) so the numbers can be checked directly.

use std::io::{self, Write};

use crate::history::HistoryEntry;

/// How many recent entries the report shows.
pub const RECENT_LIMIT: usize = 5;

/// Frequency of one label.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    /// Sorted by count, descending. Ties keep first-occurrence order.
    pub breakdown: Vec<EmotionCount>,
    /// Most recent first.
    pub recent: Vec<HistoryEntry>,
}

/// Returns `None` for an empty history.
pub fn summarize(history: &[HistoryEntry]) -> Option<Summary> {
    if history.is_empty() {
        return None;
    }
    let total = history.len();

    // Vec instead of a map so equal counts stay in encounter order.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in history {
        match counts.iter_mut().find(|(label, _)| *label == entry.emotion) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.emotion.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let breakdown = counts
        .into_iter()
        .map(|(emotion, count)| EmotionCount {
            emotion,
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    let recent = history.iter().rev().take(RECENT_LIMIT).cloned().collect();

    Some(Summary {
        total,
        breakdown,
        recent,
    })
}

/// Prints the statistics block, or a "no history" line.
pub fn write_report<W: Write>(history: &[HistoryEntry], out: &mut W) -> io::Result<()> {
    let Some(summary) = summarize(history) else {
        writeln!(out, "\n📊 No emotion history yet!")?;
        return Ok(());
    };

    writeln!(out, "\n📊 Your Emotion Statistics:")?;
    writeln!(out, "Total entries: {}", summary.total)?;

    writeln!(out, "\n Emotion breakdown:")?;
    for item in &summary.breakdown {
        writeln!(
            out,
            "  {}: {} times ({:.1}%)",
            item.emotion, item.count, item.percentage
        )?;
    }

    writeln!(out, "\n Last {RECENT_LIMIT} emotions:")?;
    for entry in &summary.recent {
        writeln!(out, "  {} - {}", entry.display_timestamp(), entry.emotion)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(emotion: &str, n: u32) -> HistoryEntry {
        HistoryEntry {
            emotion: emotion.to_string(),
            timestamp: Some(format!("2024-01-{n:02} 10:00:00")),
            date: format!("2024-01-{n:02}"),
            time: "10:00".to_string(),
        }
    }

    #[test]
    fn test_empty_history_has_no_summary() {
        assert!(summarize(&[]).is_none());

        let mut out = Vec::new();
        write_report(&[], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No emotion history yet"));
    }

    #[test]
    fn test_breakdown_sorted_with_stable_ties() {
        let history = vec![
            entry("Sad", 1),
            entry("Happy", 2),
            entry("Angry", 3),
            entry("Happy", 4),
            entry("Angry", 5),
            entry("Worse", 6),
        ];
        let summary = summarize(&history).unwrap();

        assert_eq!(summary.total, 6);
        let order: Vec<_> = summary
            .breakdown
            .iter()
            .map(|c| (c.emotion.as_str(), c.count))
            .collect();
        // Happy seen before Angry, Sad before Worse
        assert_eq!(
            order,
            vec![("Happy", 2), ("Angry", 2), ("Sad", 1), ("Worse", 1)]
        );
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let history = vec![
            entry("Sad", 1),
            entry("Happy", 2),
            entry("Angry", 3),
            entry("Sad", 4),
            entry("Overwhelmed", 5),
            entry("Sad", 6),
            entry("Happy", 7),
        ];
        let summary = summarize(&history).unwrap();
        let sum: f64 = summary.breakdown.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);

        let rounded: f64 = summary
            .breakdown
            .iter()
            .map(|c| (c.percentage * 10.0).round() / 10.0)
            .sum();
        assert!((rounded - 100.0).abs() <= 0.1 + 1e-9);
    }

    #[test]
    fn test_recent_is_last_five_reversed() {
        let history: Vec<_> = (1..=8).map(|n| entry("Happy", n)).collect();
        let summary = summarize(&history).unwrap();
        let dates: Vec<_> = summary.recent.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-01-08", "2024-01-07", "2024-01-06", "2024-01-05", "2024-01-04"]
        );
    }

    #[test]
    fn test_recent_with_short_history_shows_all_reversed() {
        let history = vec![entry("Sad", 1), entry("Happy", 2), entry("Angry", 3)];
        let summary = summarize(&history).unwrap();
        let labels: Vec<_> = summary.recent.iter().map(|e| e.emotion.as_str()).collect();
        assert_eq!(labels, vec!["Angry", "Happy", "Sad"]);
    }

    #[test]
    fn test_report_formats_one_decimal() {
        let history = vec![entry("Sad", 1), entry("Happy", 2), entry("Happy", 3)];
        let mut out = Vec::new();
        write_report(&history, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Total entries: 3"));
        assert!(text.contains("  Happy: 2 times (66.7%)"));
        assert!(text.contains("  Sad: 1 times (33.3%)"));
        assert!(text.contains("  2024-01-03 10:00:00 - Happy"));
    }
}
