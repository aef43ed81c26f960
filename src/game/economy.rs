//! Food economy: spawning, expiry and the vegetable guarantee.
//!
//! # Spawn paths
//!
//! - **Refresh**: the set is replaced by a single vegetable at the grid
//!   centre (game start and every level-up).
//! - **Refill**: after a snake moves, a set smaller than `min_food` (or one
//!   that just lost its last vegetable) gets one item immediately.
//! - **Top-up**: during upkeep, a set smaller than `max_food` gets one item
//!   once `spawn_cooldown_ms` has passed since the previous spawn.
//! - **Guarantee**: if items exist but none is vegetable-class, a vegetable is
//!   spawned at once.
//!
//! Any spawn is forced to a vegetable when the set has none; otherwise the
//! class is drawn from the level's sweet probability and the fixed fruit
//! probability.

// Catalog sizes are tiny; the u32 conversion cannot truncate
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::config::FoodRules;
use crate::game::{CATALOG, Coord, FoodItem, FoodKind, FoodSpec, Grid, Snake, specs_of};
use crate::rng::RandomSource;

/// Inputs a spawn needs from the rest of the game.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams<'a> {
    /// Playing field.
    pub grid: &'a Grid,
    /// Snakes whose cells are off limits.
    pub snakes: &'a [Snake],
    /// Food rules.
    pub rules: &'a FoodRules,
    /// Current probability of a sweet.
    pub sweet_probability: f64,
    /// Logical time in milliseconds.
    pub now_ms: u64,
}

/// What an upkeep pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpkeepReport {
    /// Items removed because they outlived their class lifetime.
    pub expired: Vec<FoodItem>,
    /// Items spawned by top-up or the vegetable guarantee.
    pub spawned: Vec<FoodItem>,
}

/// Pick a class from one uniform draw.
///
/// `r < sweet` → sweet, `r < sweet + fruit` → fruit, otherwise vegetable.
#[must_use]
pub fn select_kind(r: f64, sweet_probability: f64, fruit_probability: f64) -> FoodKind {
    if r < sweet_probability {
        FoodKind::Sweet
    } else if r < sweet_probability + fruit_probability {
        FoodKind::Fruit
    } else {
        FoodKind::Vegetable
    }
}

/// Pick a catalog entry of `kind` uniformly.
pub fn pick_spec<R: RandomSource + ?Sized>(kind: FoodKind, rng: &mut R) -> &'static FoodSpec {
    let count = specs_of(kind).count() as u32;
    let index = rng.next_below(count) as usize;
    specs_of(kind).nth(index).unwrap_or(&CATALOG[0])
}

/// The active food set and its spawn clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodEconomy {
    items: Vec<FoodItem>,
    last_spawn_ms: u64,
}

impl FoodEconomy {
    /// An empty economy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active items in spawn order.
    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Number of active items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no food is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical time of the most recent spawn.
    #[must_use]
    pub const fn last_spawn_ms(&self) -> u64 {
        self.last_spawn_ms
    }

    /// Whether any vegetable-class item is active.
    #[must_use]
    pub fn has_vegetable(&self) -> bool {
        self.items.iter().any(|f| f.kind == FoodKind::Vegetable)
    }

    /// The item at `coord`, if any.
    #[must_use]
    pub fn item_at(&self, coord: Coord) -> Option<&FoodItem> {
        self.items.iter().find(|f| f.position == coord)
    }

    /// Remove and return the item at `coord`.
    pub fn take_at(&mut self, coord: Coord) -> Option<FoodItem> {
        let index = self.items.iter().position(|f| f.position == coord)?;
        Some(self.items.remove(index))
    }

    /// Place an item directly, bypassing the spawn policy.
    pub fn insert(&mut self, item: FoodItem) {
        self.items.push(item);
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the set with one vegetable at the grid centre.
    ///
    /// Falls back to a random free cell when a snake covers the centre.
    pub fn refresh<R: RandomSource + ?Sized>(
        &mut self,
        params: &SpawnParams<'_>,
        rng: &mut R,
    ) -> FoodItem {
        self.items.clear();
        let spec = pick_spec(FoodKind::Vegetable, rng);
        let center = params.grid.center();
        let position = if self.is_blocked(params, center) {
            self.find_free_cell(params, rng)
        } else {
            center
        };
        self.place(position, spec, params.now_ms)
    }

    /// Spawn one item using the class policy.
    pub fn spawn<R: RandomSource + ?Sized>(
        &mut self,
        params: &SpawnParams<'_>,
        rng: &mut R,
        force_vegetable: bool,
    ) -> FoodItem {
        let kind = if force_vegetable || !self.has_vegetable() {
            FoodKind::Vegetable
        } else {
            select_kind(
                rng.next_f64(),
                params.sweet_probability,
                params.rules.fruit_probability,
            )
        };
        let spec = pick_spec(kind, rng);
        let position = self.find_free_cell(params, rng);
        self.place(position, spec, params.now_ms)
    }

    /// Spawn at once when fewer than `min_food` items are active, or when the
    /// last vegetable was just eaten.
    pub fn refill<R: RandomSource + ?Sized>(
        &mut self,
        params: &SpawnParams<'_>,
        rng: &mut R,
    ) -> Option<FoodItem> {
        if self.items.len() < params.rules.min_food {
            Some(self.spawn(params, rng, false))
        } else if !self.has_vegetable() {
            Some(self.spawn(params, rng, true))
        } else {
            None
        }
    }

    /// Remove items past their lifetime.
    pub fn expire(&mut self, now_ms: u64, rules: &FoodRules) -> Vec<FoodItem> {
        let mut expired = Vec::new();
        self.items.retain(|item| {
            if item.is_expired(now_ms, rules) {
                expired.push(*item);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Expire, top up under the cooldown, then enforce the vegetable guarantee.
    pub fn upkeep<R: RandomSource + ?Sized>(
        &mut self,
        params: &SpawnParams<'_>,
        rng: &mut R,
    ) -> UpkeepReport {
        let mut report = UpkeepReport {
            expired: self.expire(params.now_ms, params.rules),
            spawned: Vec::new(),
        };

        let since_last = params.now_ms.saturating_sub(self.last_spawn_ms);
        if self.items.len() < params.rules.max_food && since_last > params.rules.spawn_cooldown_ms {
            report.spawned.push(self.spawn(params, rng, false));
        }

        if !self.items.is_empty() && !self.has_vegetable() {
            report.spawned.push(self.spawn(params, rng, true));
        }

        report
    }

    /// Sample random cells until one is free; fall back to the centre.
    fn find_free_cell<R: RandomSource + ?Sized>(
        &self,
        params: &SpawnParams<'_>,
        rng: &mut R,
    ) -> Coord {
        let width = params.grid.width() as u32;
        let height = params.grid.height() as u32;
        for _ in 0..params.rules.placement_attempts {
            let x = rng.next_below(width) as i32;
            let y = rng.next_below(height) as i32;
            let candidate = Coord::new(x, y);
            if !self.is_blocked(params, candidate) {
                return candidate;
            }
        }
        params.grid.center()
    }

    fn is_blocked(&self, params: &SpawnParams<'_>, coord: Coord) -> bool {
        params.snakes.iter().any(|s| s.occupies(coord)) || self.item_at(coord).is_some()
    }

    fn place(&mut self, position: Coord, spec: &'static FoodSpec, now_ms: u64) -> FoodItem {
        let item = FoodItem::new(position, spec, now_ms);
        self.items.push(item);
        self.last_spawn_ms = now_ms;
        item
    }
}
