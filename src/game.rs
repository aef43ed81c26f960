//! Game layer for Gobble.
//!
//! Implements the arena rules the engine drives each tick:
//! - Grid geometry and snakes
//! - Food catalog and the spawn/expiry economy
//! - Hazard markers
//! - Collision resolution
//! - Scores and level progression

mod collision;
mod economy;
mod food;
mod hazard;
pub mod invariants;
mod level;
mod map;
mod score;
mod snake;
mod state;

pub use collision::{
    CollisionKind, CollisionOutcome, SELF_COLLISION_MIN_INDEX, check_snake, check_wall,
    resolve_collisions,
};
pub use economy::{FoodEconomy, SpawnParams, UpkeepReport, pick_spec, select_kind};
pub use food::{CATALOG, FoodItem, FoodKind, FoodSpec, VEGETABLE_CALORIE_CEILING, specs_of};
pub use hazard::{DropRejection, HazardField, HazardMarker, check_drop};
pub use level::{
    LevelProgression, agent_speed_for, speed_multiplier_for, sweet_probability_for,
};
pub use map::{Coord, Direction, Grid};
pub use score::ScoreLedger;
pub use snake::{PLAYERS, PlayerId, START_LENGTH, Snake, opponent};
pub use state::{GameState, Phase};
