//! Semantic events emitted by the engine.
//!
//! Events are the only coupling to audio and UI side effects. Each carries a
//! short tag (`food-eaten:vegetable`, `collision:wall`) a dispatcher can match
//! on without inspecting the payload.

use serde::Serialize;

use crate::game::{CollisionKind, Coord, DropRejection, FoodKind, PlayerId};

/// Something observable that happened during a tick or a control call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum GameEvent {
    /// A new game began.
    GameStarted,
    /// The game was paused.
    Paused,
    /// The game was resumed.
    Resumed,
    /// A snake ate a food item.
    FoodEaten {
        /// Eater.
        agent_id: PlayerId,
        /// Class of the item.
        food_kind: FoodKind,
        /// Catalog name.
        name: &'static str,
        /// Points credited (negative for sweets).
        points: i32,
        /// Calories credited.
        calories: u32,
    },
    /// A food item appeared.
    FoodSpawned {
        /// Class of the item.
        food_kind: FoodKind,
        /// Where it appeared.
        position: Coord,
    },
    /// A food item outlived its lifetime.
    FoodExpired {
        /// Class of the item.
        food_kind: FoodKind,
        /// Where it was.
        position: Coord,
    },
    /// A snake dropped a hazard marker.
    HazardDropped {
        /// Dropper.
        agent_id: PlayerId,
        /// Marker cell.
        position: Coord,
    },
    /// A drop request failed its preconditions.
    HazardRejected {
        /// Requesting player.
        agent_id: PlayerId,
        /// Why it was refused.
        reason: DropRejection,
    },
    /// A snake's head touched a hazard marker.
    HazardHit {
        /// Snake that touched it.
        agent_id: PlayerId,
        /// Marker cell.
        position: Coord,
        /// Points removed before flooring at zero.
        penalty: i64,
    },
    /// A snake was eliminated.
    Collision {
        /// Eliminated player.
        agent_id: PlayerId,
        /// What it hit.
        collision: CollisionKind,
    },
    /// The global level went up.
    LevelUp {
        /// Level after promotion.
        new_level: u32,
    },
    /// The game was decided.
    GameOver {
        /// Winning player, `None` for a draw.
        winner_id: Option<PlayerId>,
    },
}

impl GameEvent {
    /// Dispatch tag, e.g. `food-eaten:sweet` or `game-over`.
    #[must_use]
    pub fn tag(&self) -> String {
        match self {
            Self::GameStarted => "game-started".to_string(),
            Self::Paused => "paused".to_string(),
            Self::Resumed => "resumed".to_string(),
            Self::FoodEaten { food_kind, .. } => format!("food-eaten:{}", food_kind.as_str()),
            Self::FoodSpawned { food_kind, .. } => format!("food-spawned:{}", food_kind.as_str()),
            Self::FoodExpired { food_kind, .. } => format!("food-expired:{}", food_kind.as_str()),
            Self::HazardDropped { .. } => "hazard-dropped".to_string(),
            Self::HazardRejected { .. } => "hazard-rejected".to_string(),
            Self::HazardHit { .. } => "hazard-hit".to_string(),
            Self::Collision { collision, .. } => format!("collision:{}", collision.as_str()),
            Self::LevelUp { .. } => "level-up".to_string(),
            Self::GameOver { .. } => "game-over".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        let eaten = GameEvent::FoodEaten {
            agent_id: 1,
            food_kind: FoodKind::Vegetable,
            name: "Lettuce",
            points: 25,
            calories: 5,
        };
        assert_eq!(eaten.tag(), "food-eaten:vegetable");

        let wall = GameEvent::Collision {
            agent_id: 2,
            collision: CollisionKind::Wall,
        };
        assert_eq!(wall.tag(), "collision:wall");
        assert_eq!(GameEvent::GameOver { winner_id: Some(1) }.tag(), "game-over");
    }

    #[test]
    fn test_json_shape() {
        let event = GameEvent::FoodEaten {
            agent_id: 1,
            food_kind: FoodKind::Sweet,
            name: "Candy",
            points: -5,
            calories: 400,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["kind"], "food-eaten");
        assert_eq!(json["foodKind"], "sweet");
        assert_eq!(json["agentId"], 1);
        assert_eq!(json["points"], -5);

        let json = serde_json::to_value(GameEvent::LevelUp { new_level: 4 }).unwrap();
        assert_eq!(json["newLevel"], 4);
    }
}
