//! Read-only views of the game handed to renderers.

use serde::Serialize;

use crate::config::GameConfig;
use crate::game::{
    Coord, Direction, FoodKind, GameState, Grid, HazardMarker, Phase, PlayerId, ScoreLedger, Snake,
};

/// One snake and its ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSnapshot {
    /// Player id.
    pub id: PlayerId,
    /// Body cells, head first. Empty once eliminated.
    pub body: Vec<Coord>,
    /// Current heading.
    pub direction: Direction,
    /// Heading for the next tick.
    pub pending_direction: Direction,
    /// Move likelihood factor.
    pub speed_factor: f64,
    /// Visual thickness.
    pub girth_factor: f64,
    /// Still in play.
    pub alive: bool,
    /// Score, calories and progress.
    #[serde(flatten)]
    pub ledger: ScoreLedger,
}

impl AgentSnapshot {
    fn capture(snake: &Snake, ledger: ScoreLedger) -> Self {
        Self {
            id: snake.id,
            body: snake.segments().collect(),
            direction: snake.direction,
            pending_direction: snake.pending_direction,
            speed_factor: snake.speed_factor,
            girth_factor: snake.girth_factor,
            alive: snake.alive,
            ledger,
        }
    }

    /// Body length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// One food item as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodSnapshot {
    /// Cell.
    pub position: Coord,
    /// Class.
    pub kind: FoodKind,
    /// Catalog name.
    pub name: &'static str,
    /// Catalog glyph.
    pub emoji: &'static str,
    /// Points on eating.
    pub points: i32,
    /// Calories on eating.
    pub calories: u32,
    /// Lifetime left, `None` for items that never expire.
    pub remaining_ms: Option<u64>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Ticks since start.
    pub tick: u64,
    /// Logical clock.
    pub now_ms: u64,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Playing field.
    pub grid: Grid,
    /// Current level.
    pub level: u32,
    /// Movement divisor for the level.
    pub speed_multiplier: f64,
    /// Chance that a free spawn is a sweet.
    pub sweet_probability: f64,
    /// Both snakes, player 1 first.
    pub agents: Vec<AgentSnapshot>,
    /// Active food.
    pub food: Vec<FoodSnapshot>,
    /// Active hazards.
    pub hazards: Vec<HazardMarker>,
    /// Winner once decided.
    pub winner: Option<PlayerId>,
}

impl Snapshot {
    /// Copy out the parts of `state` a renderer may look at.
    #[must_use]
    pub fn capture(state: &GameState, config: &GameConfig) -> Self {
        let agents = state
            .snakes
            .iter()
            .zip(state.scores)
            .map(|(snake, ledger)| AgentSnapshot::capture(snake, ledger))
            .collect();
        let food = state
            .food
            .items()
            .iter()
            .map(|item| FoodSnapshot {
                position: item.position,
                kind: item.kind,
                name: item.spec.name,
                emoji: item.spec.emoji,
                points: item.points(),
                calories: item.calories(),
                remaining_ms: item.remaining_ms(state.now_ms, &config.food),
            })
            .collect();

        Self {
            tick: state.tick,
            now_ms: state.now_ms,
            phase: state.phase,
            grid: state.grid,
            level: state.level.level,
            speed_multiplier: state.level.speed_multiplier,
            sweet_probability: state.level.sweet_probability,
            agents,
            food,
            hazards: state.hazards.markers().to_vec(),
            winner: state.winner(),
        }
    }

    /// A player's view.
    #[must_use]
    pub fn agent(&self, id: PlayerId) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// The food item at `coord`.
    #[must_use]
    pub fn food_at(&self, coord: Coord) -> Option<&FoodSnapshot> {
        self.food.iter().find(|f| f.position == coord)
    }
}
