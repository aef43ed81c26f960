//! Hazard markers dropped by snakes.
//!
//! Dropping costs the snake its tail cell and some girth and speed. A marker
//! stays until any head touches it; the toucher pays the penalty and the
//! marker is removed in the same step, so one marker can only be hit once.

use serde::Serialize;

use crate::config::HazardRules;
use crate::game::{Coord, PlayerId, Snake};

/// A marker on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HazardMarker {
    /// Cell the marker occupies.
    pub position: Coord,
    /// Player who dropped it.
    pub owner: PlayerId,
}

/// Why a drop request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum DropRejection {
    /// The game is paused or over.
    NotRunning,
    /// The snake has been eliminated.
    Eliminated,
    /// The snake is shorter than the minimum.
    TooShort {
        /// Current length.
        length: usize,
    },
    /// The previous drop was too recent.
    CoolingDown {
        /// Logical milliseconds until the next drop is allowed.
        remaining_ms: u64,
    },
}

/// All markers currently on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazardField {
    markers: Vec<HazardMarker>,
}

impl HazardField {
    /// An empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active markers in drop order.
    #[must_use]
    pub fn markers(&self) -> &[HazardMarker] {
        &self.markers
    }

    /// Number of active markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no markers are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Whether a marker sits at `coord`.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.markers.iter().any(|m| m.position == coord)
    }

    /// Place a marker directly.
    pub fn insert(&mut self, marker: HazardMarker) {
        self.markers.push(marker);
    }

    /// Remove and return the first marker at `coord`.
    pub fn take_at(&mut self, coord: Coord) -> Option<HazardMarker> {
        let index = self.markers.iter().position(|m| m.position == coord)?;
        Some(self.markers.remove(index))
    }

    /// Drop a marker at `snake`'s tail.
    ///
    /// On success the tail cell is removed for good, girth and speed shrink by
    /// their steps (never below the floors) and the cooldown restarts.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition; the snake is left untouched.
    pub fn drop_from(
        &mut self,
        snake: &mut Snake,
        rules: &HazardRules,
        now_ms: u64,
    ) -> Result<HazardMarker, DropRejection> {
        check_drop(snake, rules, now_ms)?;

        let Some(position) = snake.pop_tail() else {
            return Err(DropRejection::TooShort { length: 0 });
        };
        snake.girth_factor = (snake.girth_factor - rules.girth_step).max(rules.girth_floor);
        snake.speed_factor = (snake.speed_factor - rules.speed_step).max(rules.speed_floor);
        snake.last_hazard_ms = Some(now_ms);

        let marker = HazardMarker {
            position,
            owner: snake.id,
        };
        self.markers.push(marker);
        Ok(marker)
    }
}

/// Check drop preconditions without changing anything.
///
/// # Errors
///
/// Returns why the drop would be ignored.
pub fn check_drop(snake: &Snake, rules: &HazardRules, now_ms: u64) -> Result<(), DropRejection> {
    if !snake.alive {
        return Err(DropRejection::Eliminated);
    }
    if snake.len() < rules.min_length {
        return Err(DropRejection::TooShort { length: snake.len() });
    }
    if let Some(last) = snake.last_hazard_ms {
        let elapsed = now_ms.saturating_sub(last);
        if elapsed < rules.cooldown_ms {
            return Err(DropRejection::CoolingDown {
                remaining_ms: rules.cooldown_ms - elapsed,
            });
        }
    }
    Ok(())
}
