//! CLI output formatting
//!
//! Provides human-readable terminal display for the timer: countdown,
//! history table and the window title.

pub mod display;
pub mod title;

pub use display::render_history;
pub use display::render_status;
pub use title::{NoTitle, TerminalTitle, TitleSink, TitleUpdater};
