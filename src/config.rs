//! Game rules and their JSON representation.
//!
//! Every tunable number the simulation uses lives in [`GameConfig`]. The
//! defaults reproduce the classic two-player rules; a JSON file only needs to
//! name the fields it overrides.

// Periods are fractional milliseconds; the conversions are intentional
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Smallest grid width that fits both starting snakes without overlap.
pub const MIN_GRID_WIDTH: i32 = 10;

/// Smallest grid height accepted.
pub const MIN_GRID_HEIGHT: i32 = 3;

/// Rules for the hazard ("poop") action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardRules {
    /// Minimum body length required to drop a hazard.
    pub min_length: usize,
    /// Logical milliseconds before the same snake may drop again.
    pub cooldown_ms: u64,
    /// Score removed from a snake whose head touches a hazard.
    pub penalty: i64,
    /// Girth lost per drop.
    pub girth_step: f64,
    /// Girth never drops below this.
    pub girth_floor: f64,
    /// Speed factor lost per drop.
    pub speed_step: f64,
    /// Speed factor never drops below this.
    pub speed_floor: f64,
}

impl Default for HazardRules {
    fn default() -> Self {
        Self {
            min_length: 5,
            cooldown_ms: 300,
            penalty: 1000,
            girth_step: 0.1,
            girth_floor: 0.6,
            speed_step: 0.05,
            speed_floor: 0.7,
        }
    }
}

/// Aftermath applied to a snake that eats a sweet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweetRules {
    /// Speed factor lost per sweet.
    pub speed_step: f64,
    /// Speed factor never drops below this.
    pub speed_floor: f64,
    /// Girth gained per sweet.
    pub girth_step: f64,
    /// Girth never exceeds this.
    pub girth_cap: f64,
    /// Tail segments trimmed per sweet.
    pub trim: usize,
    /// Trimming never shortens a snake below this length.
    pub trim_floor: usize,
}

impl Default for SweetRules {
    fn default() -> Self {
        Self {
            speed_step: 0.1,
            speed_floor: 0.5,
            girth_step: 0.2,
            girth_cap: 2.0,
            trim: 2,
            trim_floor: 3,
        }
    }
}

/// Level progression formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelRules {
    /// Highest reachable level.
    pub max_level: u32,
    /// Progress points needed to leave a level.
    pub threshold: u32,
    /// Speed multiplier gained per level above 1.
    pub multiplier_step: f64,
    /// Agent speed factor gained per level above 1.
    pub agent_speed_step: f64,
    /// Agent speed factor cap applied on level-up.
    pub agent_speed_cap: f64,
    /// Sweet probability at level 1, before any promotion.
    pub initial_sweet_probability: f64,
    /// Base of the post-promotion sweet probability formula.
    pub sweet_base: f64,
    /// Sweet probability gained per level.
    pub sweet_step: f64,
    /// Sweet probability never exceeds this.
    pub sweet_cap: f64,
}

impl Default for LevelRules {
    fn default() -> Self {
        Self {
            max_level: 100,
            threshold: 50,
            multiplier_step: 0.1,
            agent_speed_step: 0.05,
            agent_speed_cap: 2.0,
            initial_sweet_probability: 0.10,
            sweet_base: 0.15,
            sweet_step: 0.003,
            sweet_cap: 0.4,
        }
    }
}

/// Food spawn and expiry rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodRules {
    /// Below this count a moving snake triggers an immediate spawn.
    pub min_food: usize,
    /// Below this count upkeep spawns once the cooldown elapsed.
    pub max_food: usize,
    /// Logical milliseconds between upkeep spawns.
    pub spawn_cooldown_ms: u64,
    /// Lifetime of vegetable-class items.
    pub vegetable_ttl_ms: u64,
    /// Lifetime of fruit-class items.
    pub fruit_ttl_ms: u64,
    /// Probability that a free spawn is a fruit.
    pub fruit_probability: f64,
    /// Random cells tried before falling back to the grid centre.
    pub placement_attempts: u32,
}

impl Default for FoodRules {
    fn default() -> Self {
        Self {
            min_food: 2,
            max_food: 3,
            spawn_cooldown_ms: 5000,
            vegetable_ttl_ms: 30_000,
            fruit_ttl_ms: 60_000,
            fruit_probability: 0.30,
            placement_attempts: 50,
        }
    }
}

/// Complete rule set for one game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width in cells.
    pub grid_width: i32,
    /// Grid height in cells.
    pub grid_height: i32,
    /// Tick period at level 0, in milliseconds.
    pub base_period_ms: f64,
    /// Period shortening per level, in milliseconds.
    pub period_decay_ms: f64,
    /// Shortest allowed tick period, in milliseconds.
    pub min_period_ms: f64,
    /// Level progression.
    pub levels: LevelRules,
    /// Food economy.
    pub food: FoodRules,
    /// Hazard action.
    pub hazard: HazardRules,
    /// Sweet aftermath.
    pub sweet: SweetRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 48,
            grid_height: 32,
            base_period_ms: 300.0,
            period_decay_ms: 1.25,
            min_period_ms: 50.0,
            levels: LevelRules::default(),
            food: FoodRules::default(),
            hazard: HazardRules::default(),
            sweet: SweetRules::default(),
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any validation error.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the rules describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid_width < MIN_GRID_WIDTH || self.grid_height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min_width: MIN_GRID_WIDTH,
                min_height: MIN_GRID_HEIGHT,
            });
        }

        if self.min_period_ms.is_nan()
            || self.min_period_ms <= 0.0
            || self.base_period_ms < self.min_period_ms
        {
            return Err(ConfigError::InvalidPeriod(format!(
                "base {}ms must be >= min {}ms > 0",
                self.base_period_ms, self.min_period_ms
            )));
        }
        if self.period_decay_ms < 0.0 {
            return Err(ConfigError::InvalidPeriod(format!(
                "decay {}ms must not be negative",
                self.period_decay_ms
            )));
        }

        let levels = &self.levels;
        if levels.max_level == 0 {
            return Err(ConfigError::InvalidLevels("max_level must be at least 1".into()));
        }
        if levels.threshold == 0 {
            return Err(ConfigError::InvalidLevels("threshold must be at least 1".into()));
        }

        check_probability("fruit_probability", self.food.fruit_probability)?;
        check_probability("initial_sweet_probability", levels.initial_sweet_probability)?;
        check_probability("sweet_cap", levels.sweet_cap)?;
        check_probability(
            "initial_sweet_probability + fruit_probability",
            levels.initial_sweet_probability + self.food.fruit_probability,
        )?;
        check_probability(
            "sweet_cap + fruit_probability",
            levels.sweet_cap + self.food.fruit_probability,
        )?;

        if self.food.min_food == 0 || self.food.min_food > self.food.max_food {
            return Err(ConfigError::InvalidFood(format!(
                "need 1 <= min_food ({}) <= max_food ({})",
                self.food.min_food, self.food.max_food
            )));
        }

        Ok(())
    }

    /// Tick period for a level: `max(base - level * decay, min)`.
    #[must_use]
    pub fn tick_period(&self, level: u32) -> Duration {
        let ms = (self.base_period_ms - f64::from(level) * self.period_decay_ms)
            .max(self.min_period_ms);
        Duration::from_micros((ms * 1000.0).round() as u64)
    }
}

fn check_probability(name: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}
