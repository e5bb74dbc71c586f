//! Terminal rendering for the timer
//!
//! Pure string builders for the countdown, status lines and the history
//! table. The session decides where the strings are written.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

use crate::cycle::countdown::Countdown;
use crate::cycle::tracker::{Cycle, CycleStatus, CycleTracker};

/// Widest task label shown in the history table before truncation
const MAX_TASK_WIDTH: usize = 40;

/// Countdown line for the active cycle, e.g. `"  24:59  Write report"`
#[must_use]
pub fn render_countdown(countdown: Countdown, task: &str) -> String {
    format!("  {}  {}", countdown.to_string().bold(), task.dimmed())
}

/// One-line status: countdown and task while active, idle otherwise
#[must_use]
pub fn render_status(tracker: &CycleTracker) -> String {
    match tracker.active_cycle() {
        Some(cycle) => format!(
            "{}  {} {}",
            render_countdown(tracker.countdown(), cycle.task()),
            cycle.id().to_string().dimmed(),
            format!("of {}", format_duration(cycle.minutes_amount())).dimmed()
        ),
        None => format!("  {}  {}", tracker.countdown(), "idle".dimmed()),
    }
}

/// Line printed when a cycle starts
#[must_use]
pub fn render_started(cycle: &Cycle) -> String {
    format!(
        "{} {} {} ({})",
        "▶".green().bold(),
        "Started".green().bold(),
        cycle.task().bold(),
        format_duration(cycle.minutes_amount())
    )
}

/// Line printed when a cycle is interrupted
#[must_use]
pub fn render_interrupted(cycle: &Cycle) -> String {
    format!(
        "{} {} {}",
        "■".red().bold(),
        "Interrupted".red().bold(),
        cycle.task().bold()
    )
}

/// Line printed when a cycle runs to completion
#[must_use]
pub fn render_finished(cycle: &Cycle) -> String {
    format!(
        "{} {} {} ({})",
        "✔".green().bold(),
        "Completed".green().bold(),
        cycle.task().bold(),
        format_duration(cycle.minutes_amount())
    )
}

/// Human label for a cycle status
#[must_use]
pub const fn status_label(status: CycleStatus) -> &'static str {
    match status {
        CycleStatus::InProgress => "In progress",
        CycleStatus::Completed => "Completed",
        CycleStatus::Interrupted => "Interrupted",
    }
}

/// Duration column text, e.g. `"25 minutes"`
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    plural(u64::from(minutes), "minute")
}

/// Render the activity history as an aligned table.
///
/// Columns: task, duration, start (relative to `now`), status.
#[must_use]
pub fn render_history(cycles: &[Cycle], now: DateTime<Utc>) -> String {
    if cycles.is_empty() {
        return format!("  {}", "No cycles yet.".dimmed());
    }

    let rows: Vec<[String; 4]> = cycles
        .iter()
        .map(|c| {
            [
                truncate(c.task(), MAX_TASK_WIDTH),
                format_duration(c.minutes_amount()),
                format_relative(c.start_date(), now),
                status_label(c.status()).to_string(),
            ]
        })
        .collect();

    let header = ["Task", "Duration", "Start", "Status"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_line = header
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&format!("  {}\n", header_line.bold()));
    out.push_str(&format!(
        "  {}\n",
        "─".repeat(widths.iter().sum::<usize>() + 6).dimmed()
    ));

    for (cycle, row) in cycles.iter().zip(&rows) {
        // Pad before coloring so escape codes don't skew alignment
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        let status = match cycle.status() {
            CycleStatus::Completed => cells[3].green().to_string(),
            CycleStatus::Interrupted => cells[3].red().to_string(),
            CycleStatus::InProgress => cells[3].yellow().to_string(),
        };
        out.push_str(&format!(
            "  {}  {}  {}  {}\n",
            cells[0], cells[1], cells[2], status
        ));
    }

    // Trailing whitespace from the last padded column is noise
    out.lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
}

/// Render the history as pretty-printed JSON, status included.
pub fn history_json(cycles: &[Cycle]) -> Result<String> {
    let entries: Vec<serde_json::Value> = cycles
        .iter()
        .map(|c| -> Result<serde_json::Value, serde_json::Error> {
            let mut value = serde_json::to_value(c)?;
            value["status"] = json!(c.status());
            Ok(value)
        })
        .collect::<Result<_, _>>()
        .context("Failed to serialize cycle history")?;
    serde_json::to_string_pretty(&entries).context("Failed to serialize cycle history")
}

/// Describe how far `then` is from `now`, e.g. `"about 2 months ago"`.
#[must_use]
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let distance = format_distance(seconds.unsigned_abs());
    if seconds < 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

/// Approximate distance for a number of seconds, rounded to the nearest unit.
fn format_distance(seconds: u64) -> String {
    const HOUR: u64 = 60;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;

    let minutes = (seconds + 30) / 60;
    match minutes {
        0 => "less than a minute".to_string(),
        1..45 => plural(minutes, "minute"),
        45..90 => "about 1 hour".to_string(),
        90..DAY => format!("about {}", plural(round_div(minutes, HOUR), "hour")),
        // Up to 42 hours still reads as one day
        DAY..2520 => "1 day".to_string(),
        2520..MONTH => plural(round_div(minutes, DAY), "day"),
        MONTH..86_400 => format!("about {}", plural(round_div(minutes, MONTH), "month")),
        _ => {
            let months = minutes / MONTH;
            if months < 12 {
                return plural(months, "month");
            }
            let years = months / 12;
            match months % 12 {
                0..3 => format!("about {}", plural(years, "year")),
                3..9 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    }
}

const fn round_div(value: u64, unit: u64) -> u64 {
    (value + unit / 2) / unit
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn ago(seconds: i64) -> String {
        format_relative(t0() - Duration::seconds(seconds), t0())
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(25), "25 minutes");
        assert_eq!(format_duration(5), "5 minutes");
    }

    #[test]
    fn test_format_relative_short_ranges() {
        assert_eq!(ago(0), "less than a minute ago");
        assert_eq!(ago(29), "less than a minute ago");
        assert_eq!(ago(45), "1 minute ago");
        assert_eq!(ago(10 * 60), "10 minutes ago");
        assert_eq!(ago(50 * 60), "about 1 hour ago");
        assert_eq!(ago(5 * 3600), "about 5 hours ago");
    }

    #[test]
    fn test_format_relative_long_ranges() {
        let day = 86_400;
        assert_eq!(ago(day), "1 day ago");
        assert_eq!(ago(3 * day), "3 days ago");
        assert_eq!(ago(40 * day), "about 1 month ago");
        assert_eq!(ago(55 * day), "about 2 months ago");
        assert_eq!(ago(100 * day), "3 months ago");
        assert_eq!(ago(370 * day), "about 1 year ago");
        assert_eq!(ago(365 * day + 180 * day), "over 1 year ago");
        assert_eq!(ago(365 * day + 330 * day), "almost 2 years ago");
    }

    #[test]
    fn test_format_relative_future() {
        let later = t0() + Duration::minutes(10);
        assert_eq!(format_relative(later, t0()), "in 10 minutes");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        let long = "x".repeat(50);
        let cut = truncate(&long, MAX_TASK_WIDTH);
        assert_eq!(cut.chars().count(), MAX_TASK_WIDTH);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(CycleStatus::Completed), "Completed");
        assert_eq!(status_label(CycleStatus::Interrupted), "Interrupted");
        assert_eq!(status_label(CycleStatus::InProgress), "In progress");
    }

    #[test]
    fn test_render_history_empty() {
        assert!(render_history(&[], t0()).contains("No cycles yet."));
    }

    #[test]
    fn test_render_history_rows() {
        let mut tracker = CycleTracker::new();
        tracker.start("Write report", 25, t0()).unwrap();
        tracker.tick(t0() + Duration::seconds(1500));
        tracker.start("Email", 10, t0() + Duration::seconds(1600)).unwrap();
        tracker.interrupt(t0() + Duration::seconds(1605));
        tracker.start("Read", 5, t0() + Duration::seconds(1700)).unwrap();

        let table = render_history(tracker.cycles(), t0() + Duration::seconds(1800));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5, "header, rule and three rows:\n{table}");
        assert!(lines[0].contains("Task") && lines[0].contains("Status"));
        assert!(lines[2].contains("Write report") && lines[2].contains("Completed"));
        assert!(lines[2].contains("25 minutes") && lines[2].contains("30 minutes ago"));
        assert!(lines[3].contains("Email") && lines[3].contains("Interrupted"));
        assert!(lines[4].contains("Read") && lines[4].contains("In progress"));
    }

    #[test]
    fn test_history_json_includes_status() {
        let mut tracker = CycleTracker::new();
        tracker.start("Email", 10, t0()).unwrap();
        tracker.interrupt(t0() + Duration::seconds(5));
        tracker.start("Read", 5, t0() + Duration::seconds(10)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&history_json(tracker.cycles()).unwrap()).unwrap();
        let entries = json.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["task"], "Email");
        assert_eq!(entries[0]["status"], "interrupted");
        assert_eq!(entries[0]["interrupted_date"], "2026-03-02T09:00:05Z");
        assert_eq!(entries[1]["status"], "in_progress");
        assert!(entries[1].get("finished_date").is_none());
    }

    #[test]
    fn test_render_status_idle_and_active() {
        let mut tracker = CycleTracker::new();
        assert!(render_status(&tracker).contains("00:00"));
        assert!(render_status(&tracker).contains("idle"));

        tracker.start("Read", 5, t0()).unwrap();
        tracker.tick(t0() + Duration::seconds(10));
        let status = render_status(&tracker);
        assert!(status.contains("04:50"));
        assert!(status.contains("Read"));
    }
}
