//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger in a correctly implemented engine. The engine
//! runs [`assert_invariants`] after every tick in debug builds; property tests
//! call [`check_invariants`] directly.

use crate::game::{FoodKind, GameState, Phase};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violation = |message: String| violations.push(InvariantViolation { message });

    for snake in &state.snakes {
        if snake.alive {
            if snake.is_empty() {
                violation(format!("Live snake {} has no body", snake.id));
            }
            // Every cell of a live snake is on the grid; a head that left it
            // must have been eliminated in the same tick.
            for cell in snake.segments() {
                if !state.grid.contains(cell) {
                    violation(format!("Snake {} has cell {cell:?} off the grid", snake.id));
                }
            }
        } else if !snake.is_empty() {
            violation(format!(
                "Eliminated snake {} still has {} cells",
                snake.id,
                snake.len()
            ));
        }
    }

    let dead = state.snakes.iter().filter(|s| !s.alive).count();
    match state.phase {
        Phase::Over {
            winner: Some(winner),
        } => {
            if state.snake(winner).is_none_or(|s| !s.alive) {
                violation(format!("Winner {winner} is not a live snake"));
            }
            if dead == 0 {
                violation(format!("Player {winner} won but no snake was eliminated"));
            }
        }
        Phase::Over { winner: None } => {
            if dead != state.snakes.len() {
                violation(format!("Drawn game with {dead} snake(s) eliminated"));
            }
        }
        _ if dead > 0 => {
            violation(format!("{dead} snake(s) eliminated but the game is not over"));
        }
        _ => {}
    }

    if !state.food.is_empty() && !state.food.has_vegetable() {
        violation(format!(
            "{} food item(s) active but none is a vegetable",
            state.food.len()
        ));
    }

    for item in state.food.items() {
        if !state.grid.contains(item.position) {
            violation(format!("Food at {:?} is off the grid", item.position));
        }
        if item.created_at_ms > state.now_ms {
            violation(format!(
                "Food at {:?} created at {}ms, after now ({}ms)",
                item.position, item.created_at_ms, state.now_ms
            ));
        }
        if item.kind == FoodKind::Sweet && item.points() >= 0 {
            violation(format!("Sweet {} awards {} points", item.spec.name, item.points()));
        }
    }

    for marker in state.hazards.markers() {
        if !state.grid.contains(marker.position) {
            violation(format!("Hazard at {:?} is off the grid", marker.position));
        }
    }

    if state.level.level == 0 {
        violation("Level is 0".to_string());
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
