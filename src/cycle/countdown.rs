//! Countdown formatting
//!
//! Splits a number of remaining seconds into the `MM:SS` pair shown on the
//! countdown and in the terminal title.

use std::fmt;

/// Minutes and seconds left on a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    /// Whole minutes remaining
    pub minutes: u64,
    /// Seconds remaining past the whole minutes (0-59)
    pub seconds: u64,
}

impl Countdown {
    /// Build a countdown from a total number of seconds.
    #[must_use]
    pub const fn from_seconds(remaining_seconds: u64) -> Self {
        Self {
            minutes: remaining_seconds / 60,
            seconds: remaining_seconds % 60,
        }
    }

    /// Zero-padded minutes
    #[must_use]
    pub fn minutes_display(&self) -> String {
        pad2(self.minutes)
    }

    /// Zero-padded seconds
    #[must_use]
    pub fn seconds_display(&self) -> String {
        pad2(self.seconds)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.minutes_display(), self.seconds_display())
    }
}

/// Left-pad a number with zeros to at least two characters.
#[must_use]
pub fn pad2(value: u64) -> String {
    format!("{value:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad2_single_digit() {
        assert_eq!(pad2(7), "07");
        assert_eq!(pad2(0), "00");
    }

    #[test]
    fn test_pad2_always_two_chars_below_100() {
        for value in 0..100 {
            assert_eq!(pad2(value).len(), 2, "value {value}");
        }
    }

    #[test]
    fn test_from_seconds_splits_minutes() {
        let countdown = Countdown::from_seconds(290);
        assert_eq!(countdown.minutes, 4);
        assert_eq!(countdown.seconds, 50);
        assert_eq!(countdown.to_string(), "04:50");
    }

    #[test]
    fn test_full_hour() {
        assert_eq!(Countdown::from_seconds(3600).to_string(), "60:00");
    }

    #[test]
    fn test_zero() {
        assert_eq!(Countdown::from_seconds(0).to_string(), "00:00");
        assert_eq!(Countdown::default(), Countdown::from_seconds(0));
    }
}
