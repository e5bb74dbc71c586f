//! New-cycle form validation
//!
//! Checks a submission before it reaches the tracker, so bad input is reported
//! to the user instead of being treated as a broken precondition.

use anyhow::{bail, Context, Result};

/// Shortest cycle that can be requested, in minutes
pub const MIN_MINUTES: u32 = 5;
/// Longest cycle that can be requested, in minutes
pub const MAX_MINUTES: u32 = 60;
/// Increment used when suggesting durations
pub const MINUTES_STEP: u32 = 5;

/// A validated new-cycle submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCycle {
    /// Trimmed, non-empty task label
    pub task: String,
    /// Duration in minutes, within [`MIN_MINUTES`, `MAX_MINUTES`]
    pub minutes_amount: u32,
}

impl NewCycle {
    /// Validate a task label and duration.
    pub fn validate(task: &str, minutes_amount: u32) -> Result<Self> {
        let task = task.trim();
        if task.is_empty() {
            bail!("Task must not be empty");
        }
        validate_minutes(minutes_amount)?;
        Ok(Self {
            task: task.to_string(),
            minutes_amount,
        })
    }

    /// Parse the arguments of a `start` command.
    ///
    /// Accepts `[minutes] <task words...>`. When the first word is not a
    /// number, `default_minutes` is used and every word belongs to the task.
    pub fn parse_args(args: &str, default_minutes: u32) -> Result<Self> {
        let args = args.trim();
        let (first, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));

        if is_number(first) {
            let minutes = first
                .parse::<u32>()
                .with_context(|| format!("Invalid duration '{first}'"))?;
            return Self::validate(rest, minutes);
        }
        if first.strip_prefix('-').is_some_and(is_number) {
            bail!("Duration must be between {MIN_MINUTES} and {MAX_MINUTES} minutes");
        }

        Self::validate(args, default_minutes)
    }
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

/// Check that a duration is within the allowed range.
pub fn validate_minutes(minutes_amount: u32) -> Result<()> {
    if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes_amount) {
        bail!("Duration must be between {MIN_MINUTES} and {MAX_MINUTES} minutes");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert_eq!(NewCycle::validate("Task", 5).unwrap().minutes_amount, 5);
        assert_eq!(NewCycle::validate("Task", 60).unwrap().minutes_amount, 60);
    }

    #[test]
    fn test_validate_trims_task() {
        let cycle = NewCycle::validate("  Write report \n", 25).unwrap();
        assert_eq!(cycle.task, "Write report");
    }

    #[test]
    fn test_validate_rejects_empty_task() {
        let err = NewCycle::validate("   ", 25).unwrap_err();
        assert_eq!(err.to_string(), "Task must not be empty");
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        for minutes in [0, 4, 61, 120] {
            let err = NewCycle::validate("Task", minutes).unwrap_err();
            assert!(err.to_string().contains("between 5 and 60"), "minutes {minutes}");
        }
    }

    #[test]
    fn test_parse_args_with_minutes() {
        let cycle = NewCycle::parse_args("25 Write report", 10).unwrap();
        assert_eq!(
            cycle,
            NewCycle {
                task: "Write report".to_string(),
                minutes_amount: 25
            }
        );
    }

    #[test]
    fn test_parse_args_uses_default_minutes() {
        let cycle = NewCycle::parse_args("Read chapter 3", 15).unwrap();
        assert_eq!(cycle.task, "Read chapter 3");
        assert_eq!(cycle.minutes_amount, 15);
    }

    #[test]
    fn test_parse_args_minutes_without_task() {
        assert!(NewCycle::parse_args("25", 10).is_err());
        assert!(NewCycle::parse_args("", 10).is_err());
    }

    #[test]
    fn test_parse_args_rejects_negative_minutes() {
        let err = NewCycle::parse_args("-5 Read", 10).unwrap_err();
        assert!(err.to_string().contains("between 5 and 60"));
    }

    #[test]
    fn test_parse_args_huge_number_is_error() {
        assert!(NewCycle::parse_args("99999999999 Read", 10).is_err());
    }
}
