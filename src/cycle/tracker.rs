//! Cycle tracker
//!
//! Owns the history of work cycles and the identity of the one currently
//! counting down. Time is always passed in by the caller, so the state machine
//! is deterministic and needs no real timer to test.

use std::fmt;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::countdown::{self, Countdown};
use crate::cycle::form::NewCycle;

/// Unique identifier of a cycle, assigned in creation order starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(u64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a cycle is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    /// Still counting down
    InProgress,
    /// Ran for its full duration
    Completed,
    /// Cancelled before the duration elapsed
    Interrupted,
}

/// One requested work session
///
/// Fields are only readable from outside the tracker; once a cycle is closed
/// nothing can change it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    id: CycleId,
    task: String,
    minutes_amount: u32,
    start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interrupted_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    finished_date: Option<DateTime<Utc>>,
}

impl Cycle {
    /// Identifier of the cycle
    #[must_use]
    pub const fn id(&self) -> CycleId {
        self.id
    }

    /// Task label
    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Requested duration in minutes
    #[must_use]
    pub const fn minutes_amount(&self) -> u32 {
        self.minutes_amount
    }

    /// Requested duration in seconds
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes_amount) * 60
    }

    /// When the cycle was started
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// When the cycle was interrupted, if it was
    #[must_use]
    pub const fn interrupted_date(&self) -> Option<DateTime<Utc>> {
        self.interrupted_date
    }

    /// When the cycle ran out, if it did
    #[must_use]
    pub const fn finished_date(&self) -> Option<DateTime<Utc>> {
        self.finished_date
    }

    /// Lifecycle status derived from the closing dates
    #[must_use]
    pub const fn status(&self) -> CycleStatus {
        if self.interrupted_date.is_some() {
            CycleStatus::Interrupted
        } else if self.finished_date.is_some() {
            CycleStatus::Completed
        } else {
            CycleStatus::InProgress
        }
    }

    const fn is_open(&self) -> bool {
        self.interrupted_date.is_none() && self.finished_date.is_none()
    }
}

/// State change notification emitted by the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// A new cycle became active
    Started {
        /// Id of the new cycle
        id: CycleId,
        /// Its task label
        task: String,
    },
    /// The active cycle was re-sampled and is still running
    Ticked {
        /// Seconds left on the active cycle
        remaining_seconds: u64,
    },
    /// The active cycle was cancelled
    Interrupted {
        /// Id of the cancelled cycle
        id: CycleId,
    },
    /// The active cycle ran for its full duration
    Finished {
        /// Id of the finished cycle
        id: CycleId,
    },
}

/// Owns all cycles and drives the active one
#[derive(Debug, Default)]
pub struct CycleTracker {
    cycles: Vec<Cycle>,
    active_cycle_id: Option<CycleId>,
    elapsed_seconds: u64,
    next_id: u64,
    events: Vec<TrackerEvent>,
}

impl CycleTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle at `now` and make it active.
    ///
    /// Fails if a cycle is already active, or if the inputs would not have
    /// passed form validation.
    pub fn start(
        &mut self,
        task: &str,
        minutes_amount: u32,
        now: DateTime<Utc>,
    ) -> Result<CycleId> {
        if let Some(active) = self.active_cycle() {
            bail!(
                "Cycle {} ('{}') is still running; stop it first",
                active.id,
                active.task
            );
        }
        let NewCycle {
            task,
            minutes_amount,
        } = NewCycle::validate(task, minutes_amount)?;

        self.next_id += 1;
        let id = CycleId(self.next_id);
        self.cycles.push(Cycle {
            id,
            task: task.clone(),
            minutes_amount,
            start_date: now,
            interrupted_date: None,
            finished_date: None,
        });
        self.active_cycle_id = Some(id);
        self.elapsed_seconds = 0;
        self.events.push(TrackerEvent::Started { id, task });

        Ok(id)
    }

    /// Interrupt the active cycle at `now`. No-op when nothing is active.
    pub fn interrupt(&mut self, now: DateTime<Utc>) {
        let Some(cycle) = self.active_cycle_mut() else {
            return;
        };
        cycle.interrupted_date = Some(now);
        let id = cycle.id;
        self.active_cycle_id = None;
        self.events.push(TrackerEvent::Interrupted { id });
    }

    /// Re-sample wall-clock time for the active cycle.
    ///
    /// Marks the cycle finished once the elapsed time reaches its duration.
    /// No-op when nothing is active, so late ticks after a cycle closed are
    /// harmless.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let Some(cycle) = self.active_cycle_mut() else {
            return;
        };
        // Clock going backwards counts as no time elapsed
        let elapsed = u64::try_from((now - cycle.start_date).num_seconds()).unwrap_or(0);
        let total = cycle.total_seconds();

        if elapsed >= total {
            cycle.finished_date = Some(now);
            let id = cycle.id;
            self.elapsed_seconds = total;
            self.active_cycle_id = None;
            self.events.push(TrackerEvent::Finished { id });
        } else {
            self.elapsed_seconds = elapsed;
            self.events.push(TrackerEvent::Ticked {
                remaining_seconds: total - elapsed,
            });
        }
    }

    /// All cycles in creation order
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Look up a cycle by id
    #[must_use]
    pub fn get(&self, id: CycleId) -> Option<&Cycle> {
        self.cycles.iter().find(|c| c.id == id)
    }

    /// Id of the active cycle, if any
    #[must_use]
    pub const fn active_cycle_id(&self) -> Option<CycleId> {
        self.active_cycle_id
    }

    /// The active cycle, if any
    #[must_use]
    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.active_cycle_id.and_then(|id| self.get(id))
    }

    /// Whether a cycle is currently counting down
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active_cycle_id.is_some()
    }

    /// Seconds elapsed on the active cycle at the last tick
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Seconds left on the active cycle, 0 when idle
    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        self.active_cycle()
            .map_or(0, |c| c.total_seconds().saturating_sub(self.elapsed_seconds))
    }

    /// Countdown derived from the current state
    #[must_use]
    pub fn countdown(&self) -> Countdown {
        Countdown::from_seconds(self.remaining_seconds())
    }

    /// Zero-padded minutes of the countdown
    #[must_use]
    pub fn minutes_display(&self) -> String {
        countdown::pad2(self.remaining_seconds() / 60)
    }

    /// Zero-padded seconds of the countdown
    #[must_use]
    pub fn seconds_display(&self) -> String {
        countdown::pad2(self.remaining_seconds() % 60)
    }

    /// Take all notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TrackerEvent> {
        std::mem::take(&mut self.events)
    }

    fn active_cycle_mut(&mut self) -> Option<&mut Cycle> {
        let id = self.active_cycle_id?;
        self.cycles.iter_mut().find(|c| c.id == id && c.is_open())
    }
}
