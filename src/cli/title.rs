//! Terminal title updates
//!
//! Consumes tracker notifications and keeps the window title in sync: the
//! countdown and task while a cycle runs, the default title otherwise.

use std::io::Write;

use crate::cycle::tracker::{CycleTracker, TrackerEvent};

/// Something that can display a window title
pub trait TitleSink {
    /// Replace the current title
    fn set_title(&mut self, title: &str);
}

/// Writes the title with the xterm OSC 0 escape sequence
#[derive(Debug)]
pub struct TerminalTitle<W: Write> {
    out: W,
}

impl<W: Write> TerminalTitle<W> {
    /// Create a sink writing escape sequences to `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TitleSink for TerminalTitle<W> {
    fn set_title(&mut self, title: &str) {
        // A title that fails to render is not worth interrupting the timer over
        let _ = write!(self.out, "\x1b]0;{title}\x07");
        let _ = self.out.flush();
    }
}

/// Sink that discards every title, used with `--no-title`
#[derive(Debug, Default)]
pub struct NoTitle;

impl TitleSink for NoTitle {
    fn set_title(&mut self, _title: &str) {}
}

impl<T: TitleSink + ?Sized> TitleSink for Box<T> {
    fn set_title(&mut self, title: &str) {
        (**self).set_title(title);
    }
}

/// Title text for the current tracker state
#[must_use]
pub fn title_for(tracker: &CycleTracker, default_title: &str) -> String {
    tracker.active_cycle().map_or_else(
        || default_title.to_string(),
        |cycle| {
            format!(
                "{}:{} ({})",
                tracker.minutes_display(),
                tracker.seconds_display(),
                cycle.task()
            )
        },
    )
}

/// Maps tracker events onto title changes, skipping redundant writes
#[derive(Debug)]
pub struct TitleUpdater<T: TitleSink> {
    sink: T,
    default_title: String,
    current: Option<String>,
}

impl<T: TitleSink> TitleUpdater<T> {
    /// Create an updater that falls back to `default_title` when idle
    pub fn new(sink: T, default_title: &str) -> Self {
        Self {
            sink,
            default_title: default_title.to_string(),
            current: None,
        }
    }

    /// React to one tracker event
    pub fn handle(&mut self, event: &TrackerEvent, tracker: &CycleTracker) {
        let title = match event {
            TrackerEvent::Started { .. } | TrackerEvent::Ticked { .. } => {
                title_for(tracker, &self.default_title)
            }
            TrackerEvent::Interrupted { .. } | TrackerEvent::Finished { .. } => {
                self.default_title.clone()
            }
        };
        self.set(title);
    }

    /// Put the default title back
    pub fn reset(&mut self) {
        self.set(self.default_title.clone());
    }

    /// The underlying sink
    pub const fn sink(&self) -> &T {
        &self.sink
    }

    fn set(&mut self, title: String) {
        if self.current.as_deref() == Some(title.as_str()) {
            return;
        }
        self.sink.set_title(&title);
        self.current = Some(title);
    }
}
