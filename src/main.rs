//! Pomo - terminal Pomodoro timer
//!
//! CLI entry point for the interactive timer.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;

use pomo::cli::title::{NoTitle, TerminalTitle, TitleSink};
use pomo::config::PomoConfig;
use pomo::cycle::form::NewCycle;
use pomo::session::Session;

/// Terminal Pomodoro timer
///
/// Start a work cycle, watch it count down, and review the history of
/// completed and interrupted cycles. Type `help` at the prompt for commands.
#[derive(Parser, Debug)]
#[command(name = "pomo", version, about)]
struct Cli {
    /// Path to the pomo.toml configuration file (optional)
    #[arg(long, default_value = "pomo.toml")]
    config: PathBuf,

    /// Start a cycle for this task right away
    #[arg(long)]
    task: Option<String>,

    /// Duration of the cycle started with --task, in minutes
    #[arg(long, requires = "task")]
    minutes: Option<u32>,

    /// Do not update the terminal title
    #[arg(long)]
    no_title: bool,
}

/// Validate the cycle requested on the command line, if any.
fn initial_cycle(cli: &Cli, config: &PomoConfig) -> Result<Option<NewCycle>> {
    let Some(task) = &cli.task else {
        return Ok(None);
    };
    let minutes = cli.minutes.unwrap_or(config.default_minutes);
    NewCycle::validate(task, minutes)
        .map(Some)
        .context("Invalid --task/--minutes")
}

fn title_sink(cli: &Cli, config: &PomoConfig, interactive: bool) -> Box<dyn TitleSink> {
    if cli.no_title || !config.update_title || !interactive {
        Box::new(NoTitle)
    } else {
        Box::new(TerminalTitle::new(std::io::stdout()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = PomoConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from '{}'", cli.config.display()))?;

    let initial = initial_cycle(&cli, &config)?;
    let interactive = std::io::stdout().is_terminal();
    let sink = title_sink(&cli, &config, interactive);

    let mut session =
        Session::new(config, std::io::stdout(), sink).with_live_countdown(interactive);

    eprintln!(
        "{} {}",
        "pomo".bold().cyan(),
        "type 'help' for commands, 'quit' to leave".dimmed()
    );

    if let Some(request) = initial {
        session.start(&request, Utc::now())?;
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin).await?;

    let cycles = session.tracker().cycles();
    if !cycles.is_empty() {
        eprintln!("{}", pomo::cli::render_history(cycles, Utc::now()));
    }

    Ok(())
}
