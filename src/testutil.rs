//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use chrono::{DateTime, TimeZone, Utc};

use crate::cli::title::TitleSink;

/// Fixed starting instant for deterministic clock arithmetic.
#[must_use]
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

/// Title sink that remembers every title it was given
#[derive(Debug, Default)]
pub struct RecordedTitles {
    /// Titles in the order they were set
    pub titles: Vec<String>,
}

impl TitleSink for RecordedTitles {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}
