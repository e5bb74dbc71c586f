//! Timer configuration parser
//!
//! Parses `pomo.toml`. Every field is optional; a missing file means defaults.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cycle::form::validate_minutes;

/// Top-level configuration parsed from pomo.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PomoConfig {
    /// Duration used when `start` is given no minutes (default: 25)
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    /// How often the active cycle is re-sampled, in milliseconds (default: 1000)
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Terminal title shown while no cycle is running
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Whether to update the terminal title at all (default: true)
    #[serde(default = "default_true")]
    pub update_title: bool,
    /// Task labels offered by the `suggest` command
    #[serde(default)]
    pub suggestions: Vec<String>,
}

const fn default_minutes() -> u32 {
    25
}

const fn default_tick_millis() -> u64 {
    1000
}

fn default_title() -> String {
    "pomo".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for PomoConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            tick_millis: default_tick_millis(),
            default_title: default_title(),
            update_title: true,
            suggestions: Vec::new(),
        }
    }
}

impl PomoConfig {
    /// Parse a pomo.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load from a path if the file exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    /// Parse pomo.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse pomo.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Tick period as a `std::time::Duration`
    #[must_use]
    pub const fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_millis)
    }

    fn validate(&self) -> Result<()> {
        validate_minutes(self.default_minutes).context("Invalid default_minutes")?;

        if self.tick_millis == 0 {
            bail!("tick_millis must be greater than zero");
        }

        if self.default_title.trim().is_empty() {
            bail!("default_title cannot be empty");
        }

        if self.suggestions.iter().any(|s| s.trim().is_empty()) {
            bail!("Task suggestions cannot be empty");
        }

        Ok(())
    }
}
