//! Per-snake score keeping.

use serde::Serialize;

/// Score, calories and level progress for one snake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreLedger {
    /// Points. Sweets may push this below zero; hazard penalties clamp at zero.
    pub score: i64,
    /// Calories eaten. Never decreases.
    pub calories: u64,
    /// Progress toward the next level. Reset on level-up.
    pub level_progress: u32,
}

impl ScoreLedger {
    /// Credit a food item. Progress grows by at least 1.
    pub fn apply_food(&mut self, points: i32, calories: u32) {
        self.score += i64::from(points);
        self.calories += u64::from(calories);
        self.level_progress = self
            .level_progress
            .saturating_add(points.max(1).unsigned_abs());
    }

    /// Subtract a hazard penalty, flooring the score at zero.
    pub fn apply_penalty(&mut self, penalty: i64) {
        self.score = (self.score - penalty).max(0);
    }

    /// Clear the level progress counter.
    pub fn reset_progress(&mut self) {
        self.level_progress = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_credit() {
        let mut ledger = ScoreLedger::default();
        ledger.apply_food(25, 5);
        assert_eq!(ledger.score, 25);
        assert_eq!(ledger.calories, 5);
        assert_eq!(ledger.level_progress, 25);
    }

    #[test]
    fn test_sweets_go_negative_but_still_progress() {
        let mut ledger = ScoreLedger::default();
        ledger.apply_food(-5, 400);
        assert_eq!(ledger.score, -5);
        assert_eq!(ledger.calories, 400);
        assert_eq!(ledger.level_progress, 1);
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let mut ledger = ScoreLedger {
            score: 1200,
            ..ScoreLedger::default()
        };
        ledger.apply_penalty(1000);
        assert_eq!(ledger.score, 200);
        ledger.apply_penalty(1000);
        assert_eq!(ledger.score, 0);
    }
}
