//! The simulation engine.
//!
//! [`SimulationEngine`] owns the whole [`GameState`] and is the only thing
//! that mutates it. Each call to [`SimulationEngine::tick`] is one atomic step:
//!
//! 1. Advance the logical clock by the current tick period.
//! 2. Drain agent intents from the shared [`InputBuffer`].
//! 3. Apply each snake's buffered heading.
//! 4. Roll for movement per live snake; move, eat and refill.
//! 5. Resolve collisions. A terminal outcome freezes the game here; if every
//!    snake was eliminated the game is drawn.
//! 6. Food upkeep: expiry, top-up and the vegetable guarantee.
//! 7. Level check.
//!
//! The step returns a [`TickReport`] with the events raised and a snapshot.

// Tick periods are small positive millisecond counts
#![allow(clippy::cast_possible_truncation)]

mod event;
mod intent;
mod snapshot;

pub use event::GameEvent;
pub use intent::{InputBuffer, Intent, MAX_QUEUED_TURNS, ScriptedIntent};
pub use snapshot::{AgentSnapshot, FoodSnapshot, Snapshot};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::game::{
    CollisionOutcome, DropRejection, FoodItem, FoodKind, GameState, Grid, HazardMarker,
    LevelProgression, PLAYERS, Phase, PlayerId, Snake, SpawnParams, agent_speed_for,
    invariants::assert_invariants, opponent, resolve_collisions,
};
use crate::rng::{RandomSource, SeededRandom};

/// A lifecycle change applied from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// A fresh game started.
    Restarted,
    /// The game was paused.
    Paused,
    /// The game was resumed.
    Resumed,
}

/// Outcome of one call to [`SimulationEngine::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Whether the simulation advanced. False while not running.
    pub advanced: bool,
    /// Events raised since the previous report, in order.
    pub events: Vec<GameEvent>,
    /// State after the tick.
    pub snapshot: Snapshot,
}

impl TickReport {
    /// New level, if this tick promoted.
    #[must_use]
    pub fn level_up(&self) -> Option<u32> {
        self.events.iter().find_map(|e| match e {
            GameEvent::LevelUp { new_level } => Some(*new_level),
            _ => None,
        })
    }

    /// Whether this tick ended the game.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.game_over().is_some()
    }

    /// Winner, if this tick ended the game with one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.game_over().flatten()
    }

    fn game_over(&self) -> Option<Option<PlayerId>> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver { winner_id } => Some(*winner_id),
            _ => None,
        })
    }
}

fn spawn_params<'a>(
    grid: &'a Grid,
    snakes: &'a [Snake],
    config: &'a GameConfig,
    level: &LevelProgression,
    now_ms: u64,
) -> SpawnParams<'a> {
    SpawnParams {
        grid,
        snakes,
        rules: &config.food,
        sweet_probability: level.sweet_probability,
        now_ms,
    }
}

/// Drives one arena game.
#[derive(Debug)]
pub struct SimulationEngine<R = SeededRandom> {
    config: GameConfig,
    state: GameState,
    rng: R,
    input: Arc<InputBuffer>,
    pending: Vec<GameEvent>,
}

impl SimulationEngine<SeededRandom> {
    /// Build an engine with a ChaCha8 generator seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn seeded(config: GameConfig, seed: u64) -> ConfigResult<Self> {
        Self::new(config, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> SimulationEngine<R> {
    /// Build an engine in the [`Phase::Ready`] phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: GameConfig, rng: R) -> ConfigResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height).ok_or(
            ConfigError::GridTooSmall {
                width: config.grid_width,
                height: config.grid_height,
                min_width: crate::config::MIN_GRID_WIDTH,
                min_height: crate::config::MIN_GRID_HEIGHT,
            },
        )?;
        Ok(Self {
            state: GameState::new(grid, &config.levels),
            config,
            rng,
            input: Arc::new(InputBuffer::new()),
            pending: Vec::new(),
        })
    }

    /// The rules in force.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only access to the live state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// A copy of the state for renderers.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.config)
    }

    /// A handle input sources can write to from any thread.
    #[must_use]
    pub fn input(&self) -> Arc<InputBuffer> {
        Arc::clone(&self.input)
    }

    /// Tick period for the current level.
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.config.tick_period(self.state.level.level)
    }

    /// Events raised by control calls since the last tick, draining them.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Start a fresh game, discarding any previous one.
    ///
    /// Snakes return to their starting cells, scores and level reset, hazards
    /// clear and a single vegetable is placed at the grid centre.
    pub fn start(&mut self) {
        self.state = GameState::new(self.state.grid, &self.config.levels);
        self.input.take_restart();
        self.input.take_pause_toggle();
        for id in PLAYERS {
            self.input.take_directions(id);
            self.input.take_hazard(id);
        }

        let state = &mut self.state;
        let params = spawn_params(&state.grid, &state.snakes, &self.config, &state.level, 0);
        let item = state.food.refresh(&params, &mut self.rng);
        state.phase = Phase::Running;

        info!(
            width = state.grid.width(),
            height = state.grid.height(),
            "game started"
        );
        self.pending.push(GameEvent::GameStarted);
        self.pending.push(spawned(&item));
    }

    /// Alias of [`SimulationEngine::start`].
    pub fn restart(&mut self) {
        self.start();
    }

    /// Stop ticks from advancing. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.state.phase = Phase::Paused;
        self.pending.push(GameEvent::Paused);
        debug!(tick = self.state.tick, "paused");
        true
    }

    /// Let ticks advance again. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }
        self.state.phase = Phase::Running;
        self.pending.push(GameEvent::Resumed);
        debug!(tick = self.state.tick, "resumed");
        true
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self) -> bool {
        if self.state.is_running() {
            self.pause()
        } else {
            self.resume()
        }
    }

    /// Apply restart and pause requests waiting in the input buffer.
    ///
    /// Restart wins over a pause toggle raised in the same window. A toggle
    /// that finds the game neither running nor paused is dropped.
    pub fn apply_controls(&mut self) -> Option<Control> {
        if self.input.take_restart() {
            self.start();
            return Some(Control::Restarted);
        }
        if !self.input.take_pause_toggle() {
            return None;
        }
        if self.pause() {
            Some(Control::Paused)
        } else if self.resume() {
            Some(Control::Resumed)
        } else {
            None
        }
    }

    /// Buffer a turn for a player.
    ///
    /// Returns `false` (and changes nothing) for unknown players, finished
    /// games, 180° reversals and turns straight into the neck.
    pub fn steer(&mut self, player: PlayerId, direction: crate::game::Direction) -> bool {
        if self.state.is_over() {
            return false;
        }
        let accepted = self
            .state
            .snake_mut(player)
            .is_some_and(|snake| snake.request_direction(direction));
        if !accepted {
            trace!(player, ?direction, "direction rejected");
        }
        accepted
    }

    /// Drop a hazard behind a player's snake.
    ///
    /// # Errors
    ///
    /// Returns why the drop was refused; a `hazard-rejected` event is raised.
    pub fn drop_hazard(&mut self, player: PlayerId) -> Result<HazardMarker, DropRejection> {
        let result = if self.state.is_running() {
            let now_ms = self.state.now_ms;
            let state = &mut self.state;
            match GameState::index_of(player) {
                Some(i) => state
                    .hazards
                    .drop_from(&mut state.snakes[i], &self.config.hazard, now_ms),
                None => Err(DropRejection::Eliminated),
            }
        } else {
            Err(DropRejection::NotRunning)
        };

        match result {
            Ok(marker) => {
                debug!(player, x = marker.position.x, y = marker.position.y, "hazard dropped");
                self.pending.push(GameEvent::HazardDropped {
                    agent_id: player,
                    position: marker.position,
                });
            }
            Err(reason) => {
                trace!(player, ?reason, "hazard rejected");
                self.pending.push(GameEvent::HazardRejected {
                    agent_id: player,
                    reason,
                });
            }
        }
        result
    }

    /// Advance the simulation by one step.
    pub fn tick(&mut self) -> TickReport {
        if !self.state.is_running() {
            return self.report(false);
        }

        self.state.tick += 1;
        self.state.now_ms += self.tick_period().as_millis() as u64;
        self.drain_intents();

        for snake in self.state.snakes.iter_mut().filter(|s| s.alive) {
            snake.apply_pending_direction();
        }

        for i in 0..self.state.snakes.len() {
            let snake = &self.state.snakes[i];
            if !snake.alive {
                continue;
            }
            let roll = self.rng.next_f64();
            if roll < snake.speed_factor / self.state.level.speed_multiplier {
                self.move_snake(i);
            }
        }

        self.resolve_collisions();
        if self.state.is_over() {
            assert_invariants(&self.state);
            return self.report(true);
        }

        self.upkeep();

        if self
            .state
            .level
            .should_promote(self.state.progress(), &self.config.levels)
        {
            self.level_up();
        }

        assert_invariants(&self.state);
        self.report(true)
    }

    fn report(&mut self, advanced: bool) -> TickReport {
        TickReport {
            advanced,
            events: self.take_events(),
            snapshot: self.snapshot(),
        }
    }

    fn drain_intents(&mut self) {
        for id in PLAYERS {
            // Each turn is checked as if steered directly; the last accepted one wins
            for direction in self.input.take_directions(id) {
                self.steer(id, direction);
            }
            if self.input.take_hazard(id) {
                // Refusals are reported through events
                let _ = self.drop_hazard(id);
            }
        }
    }

    fn move_snake(&mut self, index: usize) {
        let state = &mut self.state;
        let snake = &mut state.snakes[index];
        let Some(new_head) = snake.next_head() else {
            return;
        };
        let eaten = state.food.take_at(new_head);
        snake.advance(new_head, eaten.is_some());
        let id = snake.id;

        if let Some(item) = eaten {
            self.consume(index, &item);
        }

        let state = &mut self.state;
        let params = spawn_params(
            &state.grid,
            &state.snakes,
            &self.config,
            &state.level,
            state.now_ms,
        );
        if let Some(item) = state.food.refill(&params, &mut self.rng) {
            debug!(player = id, kind = item.kind.as_str(), "food refilled");
            self.pending.push(spawned(&item));
        }
    }

    fn consume(&mut self, index: usize, item: &FoodItem) {
        let snake = &mut self.state.snakes[index];
        let id = snake.id;
        if item.kind == FoodKind::Sweet {
            let rules = &self.config.sweet;
            snake.speed_factor = (snake.speed_factor - rules.speed_step).max(rules.speed_floor);
            snake.girth_factor = (snake.girth_factor + rules.girth_step).min(rules.girth_cap);
            snake.trim_tail(rules.trim, rules.trim_floor);
        }
        self.state.scores[index].apply_food(item.points(), item.calories());

        debug!(
            player = id,
            food = item.spec.name,
            points = item.points(),
            calories = item.calories(),
            "food eaten"
        );
        self.pending.push(GameEvent::FoodEaten {
            agent_id: id,
            food_kind: item.kind,
            name: item.spec.name,
            points: item.points(),
            calories: item.calories(),
        });
    }

    fn resolve_collisions(&mut self) {
        let outcomes = resolve_collisions(
            &self.state.grid,
            &self.state.snakes,
            &self.state.hazards,
        );
        let mut losers = Vec::new();
        for outcome in outcomes {
            match outcome {
                CollisionOutcome::HazardHit { player, position } => {
                    if self.state.hazards.take_at(position).is_none() {
                        continue;
                    }
                    let penalty = self.config.hazard.penalty;
                    if let Some(ledger) = self.state.score_mut(player) {
                        ledger.apply_penalty(penalty);
                    }
                    debug!(player, x = position.x, y = position.y, "hazard hit");
                    self.pending.push(GameEvent::HazardHit {
                        agent_id: player,
                        position,
                        penalty,
                    });
                }
                CollisionOutcome::Terminal { loser, kind } => {
                    if let Some(snake) = self.state.snake_mut(loser) {
                        snake.eliminate();
                    }
                    debug!(loser, collision = kind.as_str(), "snake eliminated");
                    self.pending.push(GameEvent::Collision {
                        agent_id: loser,
                        collision: kind,
                    });
                    losers.push(loser);
                }
            }
        }

        let Some(&first) = losers.first() else {
            return;
        };
        let winner = (losers.len() == 1).then_some(opponent(first));
        self.state.phase = Phase::Over { winner };
        info!(?winner, tick = self.state.tick, "game over");
        self.pending.push(GameEvent::GameOver { winner_id: winner });
    }

    fn upkeep(&mut self) {
        let state = &mut self.state;
        let params = spawn_params(
            &state.grid,
            &state.snakes,
            &self.config,
            &state.level,
            state.now_ms,
        );
        let report = state.food.upkeep(&params, &mut self.rng);

        for item in &report.expired {
            debug!(kind = item.kind.as_str(), x = item.position.x, y = item.position.y, "food expired");
            self.pending.push(GameEvent::FoodExpired {
                food_kind: item.kind,
                position: item.position,
            });
        }
        for item in &report.spawned {
            debug!(kind = item.kind.as_str(), x = item.position.x, y = item.position.y, "food spawned");
            self.pending.push(spawned(item));
        }
    }

    fn level_up(&mut self) {
        let rules = &self.config.levels;
        let Some(new_level) = self.state.level.promote(rules) else {
            return;
        };
        for ledger in &mut self.state.scores {
            ledger.reset_progress();
        }
        let speed = agent_speed_for(new_level, rules);
        for snake in &mut self.state.snakes {
            snake.speed_factor = speed;
        }

        let state = &mut self.state;
        let params = spawn_params(
            &state.grid,
            &state.snakes,
            &self.config,
            &state.level,
            state.now_ms,
        );
        let item = state.food.refresh(&params, &mut self.rng);

        info!(
            level = new_level,
            period_ms = self.tick_period().as_millis() as u64,
            "level up"
        );
        self.pending.push(GameEvent::LevelUp { new_level });
        self.pending.push(spawned(&item));
    }
}

fn spawned(item: &FoodItem) -> GameEvent {
    GameEvent::FoodSpawned {
        food_kind: item.kind,
        position: item.position,
    }
}
