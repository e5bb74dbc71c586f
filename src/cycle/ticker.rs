//! Cancellable periodic ticker
//!
//! Holds the deadline of the next tick only while a cycle is active.
//! Cancelling clears it, so no tick can reach a cycle that already closed.
//! Arming and cancelling are plain state changes; the timer itself is only
//! created when `tick` is awaited inside a runtime.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Periodic timer that can be armed and cancelled
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    armed: bool,
    /// Deadline of the next tick, fixed on the first poll after arming
    next: Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker with the given period
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            armed: false,
            next: None,
        }
    }

    /// Start ticking. The first tick fires one period after the ticker is
    /// next awaited. Re-arming restarts the phase.
    pub fn arm(&mut self) {
        self.armed = true;
        self.next = None;
    }

    /// Stop ticking. No-op when already disarmed.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.next = None;
    }

    /// Whether the ticker is currently armed
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Wait for the next tick. Never resolves while disarmed.
    ///
    /// Cancel-safe: the deadline lives in the ticker, so a dropped wait
    /// resumes at the same deadline.
    pub async fn tick(&mut self) -> Instant {
        if !self.armed {
            return std::future::pending().await;
        }
        let period = self.period;
        let deadline = *self.next.get_or_insert_with(|| Instant::now() + period);
        sleep_until(deadline).await;

        // Elapsed time is re-derived from the wall clock, so missed ticks are skipped
        let now = Instant::now();
        let mut next = deadline + period;
        if next <= now {
            next = now + period;
        }
        self.next = Some(next);
        deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ticker_is_disarmed() {
        let ticker = Ticker::new(Duration::from_secs(1));
        assert!(!ticker.is_armed());
    }

    #[test]
    fn test_arm_and_cancel_need_no_runtime() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.arm();
        assert!(ticker.is_armed());
        ticker.cancel();
        assert!(!ticker.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_armed_ticker_fires_each_period() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.arm();

        let start = Instant::now();
        ticker.tick().await;
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.arm();
        ticker.cancel();
        assert!(!ticker.is_armed());

        let result = tokio::time::timeout(Duration::from_secs(5), ticker.tick()).await;
        assert!(result.is_err(), "Disarmed ticker must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_phase() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.arm();
        let _ = tokio::time::timeout(Duration::from_millis(700), ticker.tick()).await;
        ticker.arm();

        let start = Instant::now();
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_deadline() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.arm();

        let start = Instant::now();
        let _ = tokio::time::timeout(Duration::from_millis(400), ticker.tick()).await;
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_ticks_are_skipped() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.arm();
        ticker.tick().await;

        tokio::time::advance(Duration::from_millis(3500)).await;
        let late = Instant::now();
        ticker.tick().await;
        ticker.tick().await;
        assert_eq!(late.elapsed(), Duration::from_secs(1));
    }
}
