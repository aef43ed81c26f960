//! Error types for engine construction.
//!
//! The simulation itself has no failure modes: illegal intents are ignored and
//! terminal collisions are ordinary outcomes. Only turning a [`GameConfig`]
//! into a running engine can fail.
//!
//! [`GameConfig`]: crate::config::GameConfig

use thiserror::Error;

/// Reasons a configuration cannot be used to build an engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Grid too small to hold both starting snakes.
    #[error("grid {width}x{height} is too small (minimum {min_width}x{min_height})")]
    GridTooSmall {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
        /// Smallest accepted width.
        min_width: i32,
        /// Smallest accepted height.
        min_height: i32,
    },
    /// A probability is outside `[0, 1]` or the kind weights overflow 1.
    #[error("invalid probability for {name}: {value}")]
    InvalidProbability {
        /// Which setting was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Level rules are inconsistent.
    #[error("invalid level rules: {0}")]
    InvalidLevels(String),
    /// Tick period rules are inconsistent.
    #[error("invalid tick period: {0}")]
    InvalidPeriod(String),
    /// Food rules are inconsistent.
    #[error("invalid food rules: {0}")]
    InvalidFood(String),
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`GameConfig`].
    ///
    /// [`GameConfig`]: crate::config::GameConfig
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;
