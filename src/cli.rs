//! CLI command implementations for Gobble.

pub(crate) mod play;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use gobble::{ConfigError, GameConfig};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Final board and scores as text.
    Text,
    /// Final snapshot and every event as JSON.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {e}"))
    }
}

/// Load rules from `path`, or the defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    match path {
        Some(path) => GameConfig::load(path)
            .map_err(|e| CliError::new(format!("{}: {e}", path.display()))),
        None => Ok(GameConfig::default()),
    }
}

/// Print the effective rules.
pub(crate) fn show_config(config: &GameConfig) -> Result<(), CliError> {
    println!("{}", config.to_json()?);
    Ok(())
}

/// Use the given seed or derive one from the wall clock.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos() & u128::from(u64::MAX)).unwrap_or(42))
            .unwrap_or(42)
    })
}
