//! The game state aggregate.

use serde::Serialize;

use crate::config::LevelRules;
use crate::game::{
    FoodEconomy, Grid, HazardField, LevelProgression, PLAYERS, PlayerId, ScoreLedger, Snake,
};

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Built but not started.
    Ready,
    /// Ticks advance the simulation.
    Running,
    /// Ticks are ignored until resumed.
    Paused,
    /// A terminal collision decided the game. State is frozen.
    Over {
        /// Winning player, `None` when both snakes were eliminated.
        winner: Option<PlayerId>,
    },
}

/// Complete game state.
///
/// Snakes and score ledgers are indexed by `player_id - 1`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Playing field.
    pub grid: Grid,
    /// Both snakes, player 1 first.
    pub snakes: [Snake; 2],
    /// Both score ledgers, player 1 first.
    pub scores: [ScoreLedger; 2],
    /// Active food and spawn clock.
    pub food: FoodEconomy,
    /// Active hazard markers.
    pub hazards: HazardField,
    /// Current difficulty.
    pub level: LevelProgression,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Ticks executed since the last start.
    pub tick: u64,
    /// Logical clock in milliseconds.
    pub now_ms: u64,
}

impl GameState {
    /// Fresh state: both snakes at their starting cells, no food, level 1.
    #[must_use]
    pub fn new(grid: Grid, levels: &LevelRules) -> Self {
        Self {
            grid,
            snakes: PLAYERS.map(|id| Snake::spawn(id, &grid)),
            scores: [ScoreLedger::default(); 2],
            food: FoodEconomy::new(),
            hazards: HazardField::new(),
            level: LevelProgression::new(levels),
            phase: Phase::Ready,
            tick: 0,
            now_ms: 0,
        }
    }

    /// Array index of a player, `None` for unknown ids.
    #[must_use]
    pub const fn index_of(id: PlayerId) -> Option<usize> {
        match id {
            1 => Some(0),
            2 => Some(1),
            _ => None,
        }
    }

    /// A player's snake.
    #[must_use]
    pub fn snake(&self, id: PlayerId) -> Option<&Snake> {
        Self::index_of(id).map(|i| &self.snakes[i])
    }

    /// A player's snake, mutably.
    #[must_use]
    pub fn snake_mut(&mut self, id: PlayerId) -> Option<&mut Snake> {
        Self::index_of(id).map(|i| &mut self.snakes[i])
    }

    /// A player's score ledger.
    #[must_use]
    pub fn score(&self, id: PlayerId) -> Option<&ScoreLedger> {
        Self::index_of(id).map(|i| &self.scores[i])
    }

    /// A player's score ledger, mutably.
    #[must_use]
    pub fn score_mut(&mut self, id: PlayerId) -> Option<&mut ScoreLedger> {
        Self::index_of(id).map(|i| &mut self.scores[i])
    }

    /// Whether ticks currently advance the simulation.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    /// Whether the game has been decided.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over { .. })
    }

    /// The winner, once the game is over. A drawn game has none.
    #[must_use]
    pub const fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Over { winner } => winner,
            _ => None,
        }
    }

    /// Progress counters of both snakes.
    #[must_use]
    pub fn progress(&self) -> [u32; 2] {
        self.scores.map(|s| s.level_progress)
    }
}
