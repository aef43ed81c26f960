//! Food catalog and food items.
//!
//! Healthy foods split into two classes by energy density: anything at or
//! under [`VEGETABLE_CALORIE_CEILING`] counts as vegetable-class, the rest as
//! fruit-class. Sweets carry negative points and never expire.

use serde::Serialize;

use crate::config::FoodRules;
use crate::game::Coord;

/// Healthy foods at or below this calorie count are vegetable-class.
pub const VEGETABLE_CALORIE_CEILING: u32 = 50;

/// Class of a food item, driving spawn odds and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    /// Low-calorie healthy food. Always kept on the board.
    Vegetable,
    /// Higher-calorie healthy food.
    Fruit,
    /// Negative points and a slowing aftermath.
    Sweet,
}

impl FoodKind {
    /// Classify a catalog entry.
    #[must_use]
    pub const fn classify(healthy: bool, calories: u32) -> Self {
        if !healthy {
            Self::Sweet
        } else if calories <= VEGETABLE_CALORIE_CEILING {
            Self::Vegetable
        } else {
            Self::Fruit
        }
    }

    /// Lifetime in logical milliseconds, or `None` for items that never expire.
    #[must_use]
    pub const fn ttl_ms(self, rules: &FoodRules) -> Option<u64> {
        match self {
            Self::Vegetable => Some(rules.vegetable_ttl_ms),
            Self::Fruit => Some(rules.fruit_ttl_ms),
            Self::Sweet => None,
        }
    }

    /// Lowercase name used in event tags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetable => "vegetable",
            Self::Fruit => "fruit",
            Self::Sweet => "sweet",
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodSpec {
    /// Display name.
    pub name: &'static str,
    /// Emoji for renderers that can draw it.
    pub emoji: &'static str,
    /// Calories added to the eater's total.
    pub calories: u32,
    /// Points added to the eater's score (negative for sweets).
    pub points: i32,
    /// Healthy (vegetable or fruit) versus sweet.
    pub healthy: bool,
}

impl FoodSpec {
    const fn healthy(name: &'static str, emoji: &'static str, calories: u32, points: i32) -> Self {
        Self {
            name,
            emoji,
            calories,
            points,
            healthy: true,
        }
    }

    const fn sweet(name: &'static str, emoji: &'static str, calories: u32, points: i32) -> Self {
        Self {
            name,
            emoji,
            calories,
            points,
            healthy: false,
        }
    }

    /// Class this entry belongs to.
    #[must_use]
    pub const fn kind(&self) -> FoodKind {
        FoodKind::classify(self.healthy, self.calories)
    }
}

/// Everything that can spawn.
pub static CATALOG: [FoodSpec; 36] = [
    FoodSpec::healthy("Lettuce", "🥬", 5, 25),
    FoodSpec::healthy("Cucumber", "🥒", 8, 22),
    FoodSpec::healthy("Tomato", "🍅", 18, 20),
    FoodSpec::healthy("Broccoli", "🥦", 20, 18),
    FoodSpec::healthy("Carrot", "🥕", 25, 16),
    FoodSpec::healthy("Bell Pepper", "🫑", 30, 15),
    FoodSpec::healthy("Mushroom", "🍄", 15, 20),
    FoodSpec::healthy("Asparagus", "🌱", 27, 15),
    FoodSpec::healthy("Cabbage", "🥬", 22, 17),
    FoodSpec::healthy("Spinach", "🍃", 7, 23),
    FoodSpec::healthy("Onion", "🧅", 40, 12),
    FoodSpec::healthy("Garlic", "🧄", 45, 10),
    FoodSpec::healthy("Potato", "🥔", 130, 5),
    FoodSpec::healthy("Corn", "🌽", 85, 8),
    FoodSpec::healthy("Avocado", "🥑", 160, 5),
    FoodSpec::healthy("Apple", "🍎", 52, 10),
    FoodSpec::healthy("Banana", "🍌", 105, 8),
    FoodSpec::healthy("Orange", "🍊", 45, 12),
    FoodSpec::healthy("Strawberry", "🍓", 30, 14),
    FoodSpec::healthy("Grapes", "🍇", 62, 10),
    FoodSpec::healthy("Watermelon", "🍉", 35, 13),
    FoodSpec::healthy("Pineapple", "🍍", 50, 11),
    FoodSpec::healthy("Peach", "🍑", 39, 12),
    FoodSpec::healthy("Pear", "🍐", 57, 9),
    FoodSpec::healthy("Cherry", "🍒", 50, 10),
    FoodSpec::healthy("Kiwi", "🥝", 42, 12),
    FoodSpec::healthy("Mango", "🥭", 60, 9),
    FoodSpec::healthy("Blueberries", "🫐", 40, 13),
    FoodSpec::healthy("Coconut", "🥥", 159, 5),
    FoodSpec::healthy("Lemon", "🍋", 22, 17),
    FoodSpec::sweet("Candy", "🍬", 400, -5),
    FoodSpec::sweet("Chocolate", "🍫", 550, -8),
    FoodSpec::sweet("Ice Cream", "🍦", 300, -4),
    FoodSpec::sweet("Cake", "🍰", 350, -6),
    FoodSpec::sweet("Donut", "🍩", 250, -3),
    FoodSpec::sweet("Cookie", "🍪", 200, -2),
];

/// Catalog entries of one class, in catalog order.
pub fn specs_of(kind: FoodKind) -> impl Iterator<Item = &'static FoodSpec> {
    CATALOG.iter().filter(move |spec| spec.kind() == kind)
}

/// A food item on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodItem {
    /// Cell the item occupies.
    pub position: Coord,
    /// Class of the item.
    pub kind: FoodKind,
    /// Catalog entry it was drawn from.
    pub spec: &'static FoodSpec,
    /// Logical spawn time in milliseconds.
    pub created_at_ms: u64,
}

impl FoodItem {
    /// Create an item from a catalog entry.
    #[must_use]
    pub const fn new(position: Coord, spec: &'static FoodSpec, created_at_ms: u64) -> Self {
        Self {
            position,
            kind: spec.kind(),
            spec,
            created_at_ms,
        }
    }

    /// Points awarded when eaten.
    #[must_use]
    pub const fn points(&self) -> i32 {
        self.spec.points
    }

    /// Calories added when eaten.
    #[must_use]
    pub const fn calories(&self) -> u32 {
        self.spec.calories
    }

    /// Whether the item has outlived its class lifetime at `now_ms`.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64, rules: &FoodRules) -> bool {
        self.kind
            .ttl_ms(rules)
            .is_some_and(|ttl| now_ms.saturating_sub(self.created_at_ms) > ttl)
    }

    /// Remaining lifetime at `now_ms`, or `None` for items that never expire.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: u64, rules: &FoodRules) -> Option<u64> {
        self.kind
            .ttl_ms(rules)
            .map(|ttl| ttl.saturating_sub(now_ms.saturating_sub(self.created_at_ms)))
    }
}
