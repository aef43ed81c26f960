//! Global difficulty level.

use serde::Serialize;

use crate::config::LevelRules;

/// Movement divisor at `level`: `1 + (level - 1) * step`.
#[must_use]
pub fn speed_multiplier_for(level: u32, rules: &LevelRules) -> f64 {
    1.0 + f64::from(level.saturating_sub(1)) * rules.multiplier_step
}

/// Sweet probability after promotion to `level`.
#[must_use]
pub fn sweet_probability_for(level: u32, rules: &LevelRules) -> f64 {
    (rules.sweet_base + f64::from(level) * rules.sweet_step).min(rules.sweet_cap)
}

/// Speed factor both snakes receive on promotion to `level`.
#[must_use]
pub fn agent_speed_for(level: u32, rules: &LevelRules) -> f64 {
    (1.0 + f64::from(level.saturating_sub(1)) * rules.agent_speed_step).min(rules.agent_speed_cap)
}

/// Current level and the values derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgression {
    /// Current level, starting at 1.
    pub level: u32,
    /// Divides each snake's speed factor when rolling for movement.
    pub speed_multiplier: f64,
    /// Probability that a free spawn is a sweet.
    pub sweet_probability: f64,
}

impl LevelProgression {
    /// Level 1 with its starting values.
    #[must_use]
    pub fn new(rules: &LevelRules) -> Self {
        Self {
            level: 1,
            speed_multiplier: speed_multiplier_for(1, rules),
            sweet_probability: rules.initial_sweet_probability,
        }
    }

    /// Whether no further promotion is possible.
    #[must_use]
    pub const fn is_max(&self, rules: &LevelRules) -> bool {
        self.level >= rules.max_level
    }

    /// Whether any progress counter has reached the threshold below the cap.
    #[must_use]
    pub fn should_promote(&self, progress: impl IntoIterator<Item = u32>, rules: &LevelRules) -> bool {
        !self.is_max(rules) && progress.into_iter().any(|p| p >= rules.threshold)
    }

    /// Move up one level. Returns the new level, or `None` at the cap.
    pub fn promote(&mut self, rules: &LevelRules) -> Option<u32> {
        if self.is_max(rules) {
            return None;
        }
        self.level += 1;
        self.speed_multiplier = speed_multiplier_for(self.level, rules);
        self.sweet_probability = sweet_probability_for(self.level, rules);
        Some(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let rules = LevelRules::default();
        let level = LevelProgression::new(&rules);
        assert_eq!(level.level, 1);
        assert!((level.speed_multiplier - 1.0).abs() < 1e-9);
        assert!((level.sweet_probability - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_promote_recomputes() {
        let rules = LevelRules::default();
        let mut level = LevelProgression::new(&rules);
        assert_eq!(level.promote(&rules), Some(2));
        assert!((level.speed_multiplier - 1.1).abs() < 1e-9);
        assert!((level.sweet_probability - 0.156).abs() < 1e-9);
    }

    #[test]
    fn test_formulas_cap() {
        let rules = LevelRules::default();
        assert!((sweet_probability_for(100, &rules) - 0.4).abs() < 1e-9);
        assert!((agent_speed_for(2, &rules) - 1.05).abs() < 1e-9);
        assert!((agent_speed_for(100, &rules) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_check() {
        let rules = LevelRules::default();
        let level = LevelProgression::new(&rules);
        assert!(!level.should_promote([49, 0], &rules));
        assert!(level.should_promote([0, 50], &rules));
    }

    #[test]
    fn test_max_level_is_terminal() {
        let rules = LevelRules {
            max_level: 2,
            ..LevelRules::default()
        };
        let mut level = LevelProgression::new(&rules);
        assert_eq!(level.promote(&rules), Some(2));
        assert!(level.is_max(&rules));
        assert!(!level.should_promote([500, 500], &rules));
        assert_eq!(level.promote(&rules), None);
        assert_eq!(level.level, 2);
    }
}
