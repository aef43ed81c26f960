// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gobble: a deterministic two-player snake arena simulation engine.
//!
//! Two snakes race for food on a fixed grid. Vegetables and fruit score,
//! sweets cost points and slow the eater, and either player may drop hazards
//! behind them that penalize whoever touches them. The first snake to hit a
//! wall, itself or its opponent loses; if both leave the grid on the same
//! tick the game is drawn.
//!
//! The crate is designed for:
//! - Bit-exact deterministic runs from a seed (or a scripted random stream)
//! - A pure simulation core with no I/O or wall-clock access
//! - Renderers and audio that only consume snapshots and events
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Session (engine + TickScheduler)  │
//! ├─────────────────────────────────────┤
//! │   SimulationEngine (tick procedure) │
//! ├─────────────────────────────────────┤
//! │   Game rules (snakes, food, ...)    │
//! ├─────────────────────────────────────┤
//! │   RandomSource        GameConfig    │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod render;
pub mod rng;
pub mod scheduler;
pub mod session;

pub use config::GameConfig;
pub use engine::{GameEvent, InputBuffer, Intent, SimulationEngine, Snapshot, TickReport};
pub use error::{ConfigError, ConfigResult};
pub use game::{Coord, Direction, GameState, Phase, PlayerId};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use scheduler::{Clock, ManualClock, SystemClock, TickScheduler};
pub use session::Session;
