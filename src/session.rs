//! Interactive timer session
//!
//! Reads commands line by line, drives the tracker from a cancellable ticker
//! and renders every tracker notification. All state lives in one task; stdin,
//! the ticker and Ctrl-C are multiplexed with `tokio::select!`.

use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::cli::display;
use crate::cli::title::{TitleSink, TitleUpdater};
use crate::config::PomoConfig;
use crate::cycle::form::{NewCycle, MAX_MINUTES, MINUTES_STEP, MIN_MINUTES};
use crate::cycle::ticker::Ticker;
use crate::cycle::tracker::{CycleId, CycleTracker, TrackerEvent};

/// A parsed interactive command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `start [minutes] <task>`: raw arguments, validated later
    Start(String),
    /// `stop`: interrupt the active cycle
    Stop,
    /// `status`: print the countdown
    Status,
    /// `history [--json]`
    History {
        /// Emit JSON instead of a table
        json: bool,
    },
    /// `suggest`: list configured task suggestions
    Suggest,
    /// `help`
    Help,
    /// `quit` / `exit`
    Quit,
    /// Blank line
    Empty,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "start" | "s" => Self::Start(rest.to_string()),
            "stop" | "x" => Self::Stop,
            "status" | "st" => Self::Status,
            "history" | "h" => match rest {
                "" => Self::History { json: false },
                "--json" | "json" => Self::History { json: true },
                other => bail!("Unknown history option '{other}'"),
            },
            "suggest" => Self::Suggest,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("Unknown command '{other}'. Type 'help' for a list of commands"),
        };
        Ok(command)
    }
}

/// Whether the session keeps reading input after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going
    Continue,
    /// Leave the session
    Quit,
}

/// One interactive timer session
pub struct Session<W: Write, T: TitleSink> {
    tracker: CycleTracker,
    config: PomoConfig,
    ticker: Ticker,
    title: TitleUpdater<T>,
    out: W,
    live_countdown: bool,
}

impl<W: Write, T: TitleSink> Session<W, T> {
    /// Create a session writing to `out` and updating titles through `title_sink`
    pub fn new(config: PomoConfig, out: W, title_sink: T) -> Self {
        Self {
            tracker: CycleTracker::new(),
            ticker: Ticker::new(config.tick_period()),
            title: TitleUpdater::new(title_sink, &config.default_title),
            config,
            out,
            live_countdown: false,
        }
    }

    /// Redraw the countdown in place on every tick (for interactive terminals)
    #[must_use]
    pub fn with_live_countdown(mut self, live: bool) -> Self {
        self.live_countdown = live;
        self
    }

    /// The tracker owned by this session
    pub const fn tracker(&self) -> &CycleTracker {
        &self.tracker
    }

    /// The output writer
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// The title sink
    pub const fn title_sink(&self) -> &T {
        self.title.sink()
    }

    /// Whether the ticker is currently armed
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Start a validated cycle at `now`
    pub fn start(&mut self, request: &NewCycle, now: DateTime<Utc>) -> Result<CycleId> {
        let id = self
            .tracker
            .start(&request.task, request.minutes_amount, now)?;
        self.dispatch_events()?;
        Ok(id)
    }

    /// Interrupt the active cycle at `now`, if any
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<()> {
        if !self.tracker.is_active() {
            writeln!(self.out, "  {}", "No cycle is running.".dimmed())?;
            return Ok(());
        }
        self.tracker.interrupt(now);
        self.dispatch_events()
    }

    /// Re-sample the active cycle at `now`
    pub fn on_tick(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.tracker.tick(now);
        self.dispatch_events()
    }

    /// Execute one input line at `now`
    pub fn handle_line(&mut self, line: &str, now: DateTime<Utc>) -> Result<Flow> {
        match Command::parse(line)? {
            Command::Empty => {}
            Command::Start(args) => {
                let request = NewCycle::parse_args(&args, self.config.default_minutes)?;
                self.start(&request, now)?;
            }
            Command::Stop => self.stop(now)?,
            Command::Status => {
                self.end_live_line()?;
                writeln!(self.out, "{}", display::render_status(&self.tracker))?;
            }
            Command::History { json } => {
                self.end_live_line()?;
                let text = if json {
                    display::history_json(self.tracker.cycles())?
                } else {
                    display::render_history(self.tracker.cycles(), now)
                };
                writeln!(self.out, "{text}")?;
            }
            Command::Suggest => self.print_suggestions()?,
            Command::Help => self.print_help()?,
            Command::Quit => return Ok(Flow::Quit),
        }
        self.out.flush().context("Failed to flush output")?;
        Ok(Flow::Continue)
    }

    /// Interrupt whatever is running, cancel the ticker and restore the title
    pub fn shutdown(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.tracker.interrupt(now);
        self.dispatch_events()?;
        self.ticker.cancel();
        self.title.reset();
        self.out.flush().context("Failed to flush output")
    }

    /// Run until `quit`, end of input or Ctrl-C.
    ///
    /// Input errors (bad commands, failed validation) are reported on stderr
    /// and the session continues.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        break;
                    };
                    match self.handle_line(&line, Utc::now()) {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => break,
                        Err(err) => {
                            self.end_live_line()?;
                            eprintln!("{} {err:#}", "Error:".red().bold());
                        }
                    }
                }
                _ = self.ticker.tick(), if self.ticker.is_armed() => {
                    self.on_tick(Utc::now())?;
                }
                _ = &mut ctrl_c => break,
            }
        }

        self.shutdown(Utc::now())
    }

    /// Render pending tracker notifications and keep the ticker in step
    fn dispatch_events(&mut self) -> Result<()> {
        for event in self.tracker.drain_events() {
            self.title.handle(&event, &self.tracker);
            match &event {
                TrackerEvent::Started { id, .. } => {
                    self.ticker.arm();
                    if let Some(cycle) = self.tracker.get(*id) {
                        writeln!(self.out, "{}", display::render_started(cycle))?;
                    }
                    self.draw_live_countdown()?;
                }
                TrackerEvent::Ticked { .. } => self.draw_live_countdown()?,
                TrackerEvent::Interrupted { id } => {
                    // The live line is only open while the ticker is armed
                    self.end_live_line()?;
                    self.ticker.cancel();
                    if let Some(cycle) = self.tracker.get(*id) {
                        writeln!(self.out, "{}", display::render_interrupted(cycle))?;
                    }
                }
                TrackerEvent::Finished { id } => {
                    self.end_live_line()?;
                    self.ticker.cancel();
                    if let Some(cycle) = self.tracker.get(*id) {
                        writeln!(self.out, "{}", display::render_finished(cycle))?;
                    }
                }
            }
        }
        self.out.flush().context("Failed to flush output")
    }

    fn draw_live_countdown(&mut self) -> Result<()> {
        if !self.live_countdown {
            return Ok(());
        }
        if let Some(cycle) = self.tracker.active_cycle() {
            write!(
                self.out,
                "\r\x1b[2K{}",
                display::render_countdown(self.tracker.countdown(), cycle.task())
            )?;
        }
        Ok(())
    }

    /// Move past an in-place countdown line before printing anything else
    fn end_live_line(&mut self) -> Result<()> {
        if self.live_countdown && self.ticker.is_armed() {
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn print_suggestions(&mut self) -> Result<()> {
        if self.config.suggestions.is_empty() {
            writeln!(
                self.out,
                "  {}",
                "No suggestions configured. Add `suggestions = [...]` to pomo.toml.".dimmed()
            )?;
            return Ok(());
        }
        for suggestion in &self.config.suggestions {
            writeln!(self.out, "  {} {suggestion}", "•".cyan())?;
        }
        Ok(())
    }

    fn print_help(&mut self) -> Result<()> {
        let durations = (MIN_MINUTES..=MAX_MINUTES)
            .step_by(MINUTES_STEP as usize)
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(self.out, "{}", "Commands:".bold())?;
        writeln!(
            self.out,
            "  start [minutes] <task>   start a cycle (default {} minutes)",
            self.config.default_minutes
        )?;
        writeln!(self.out, "  stop                     interrupt the running cycle")?;
        writeln!(self.out, "  status                   show the countdown")?;
        writeln!(self.out, "  history [--json]         list past cycles")?;
        writeln!(self.out, "  suggest                  list task suggestions")?;
        writeln!(self.out, "  quit                     leave")?;
        writeln!(
            self.out,
            "  {}",
            format!("Durations from {MIN_MINUTES} to {MAX_MINUTES} minutes, e.g. {durations}")
                .dimmed()
        )?;
        Ok(())
    }
}
