//! Pomo - terminal Pomodoro timer
//!
//! Pomo runs timed work cycles from an interactive prompt, shows a live
//! countdown, and keeps a history of completed and interrupted cycles for
//! the lifetime of the session.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod cycle;
pub mod session;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::PomoConfig;
pub use cycle::countdown::Countdown;
pub use cycle::form::NewCycle;
pub use cycle::tracker::{Cycle, CycleId, CycleStatus, CycleTracker, TrackerEvent};
pub use session::{Command, Flow, Session};
