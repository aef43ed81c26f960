//! Snake state and movement.

// Start length is a small constant
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::game::{Coord, Direction, Grid};

/// Identifier of a player: 1 or 2.
pub type PlayerId = u8;

/// Both player ids, in resolution order.
pub const PLAYERS: [PlayerId; 2] = [1, 2];

/// Length of a freshly spawned snake.
pub const START_LENGTH: usize = 3;

/// The other player.
#[must_use]
pub const fn opponent(id: PlayerId) -> PlayerId {
    if id == 1 { 2 } else { 1 }
}

/// One player's snake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    /// Owner of this snake.
    pub id: PlayerId,
    /// Body cells, head first.
    body: VecDeque<Coord>,
    /// Heading used by the next move.
    pub direction: Direction,
    /// Buffered heading applied at the start of the next tick.
    pub pending_direction: Direction,
    /// Per-tick move likelihood before the level multiplier.
    pub speed_factor: f64,
    /// Visual thickness multiplier. Not used by collision.
    pub girth_factor: f64,
    /// Whether the snake is still in play.
    pub alive: bool,
    /// Logical time of the last hazard drop.
    pub last_hazard_ms: Option<u64>,
}

impl Snake {
    /// Spawn a player's snake at its fixed starting position.
    ///
    /// Player 1 starts a quarter of the way across facing right, player 2
    /// three quarters across facing left, both on the middle row.
    #[must_use]
    pub fn spawn(id: PlayerId, grid: &Grid) -> Self {
        let row = grid.height() / 2;
        let (head_x, direction) = if id == 1 {
            (grid.width() / 4, Direction::Right)
        } else {
            (grid.width() * 3 / 4, Direction::Left)
        };
        let (dx, _) = direction.opposite().offset();

        let mut body = VecDeque::with_capacity(START_LENGTH);
        for i in 0..START_LENGTH as i32 {
            body.push_back(Coord::new(head_x + dx * i, row));
        }

        Self::from_body(id, body, direction)
    }

    /// Build a snake from explicit cells, head first.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    #[must_use]
    pub fn from_body(id: PlayerId, body: impl Into<VecDeque<Coord>>, direction: Direction) -> Self {
        let body = body.into();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self {
            id,
            body,
            direction,
            pending_direction: direction,
            speed_factor: 1.0,
            girth_factor: 1.0,
            alive: true,
            last_hazard_ms: None,
        }
    }

    /// The head cell, if the snake still has a body.
    #[must_use]
    pub fn head(&self) -> Option<Coord> {
        self.body.front().copied()
    }

    /// The tail cell.
    #[must_use]
    pub fn tail(&self) -> Option<Coord> {
        self.body.back().copied()
    }

    /// Number of body cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty (only after elimination).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body cells, head first.
    pub fn segments(&self) -> impl Iterator<Item = Coord> + '_ {
        self.body.iter().copied()
    }

    /// Body cell at `index` (0 = head).
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<Coord> {
        self.body.get(index).copied()
    }

    /// Whether any body cell is at `coord`.
    #[must_use]
    pub fn occupies(&self, coord: Coord) -> bool {
        self.body.contains(&coord)
    }

    /// Buffer a turn for the next tick.
    ///
    /// Rejected (returns `false`, pending heading untouched) when the turn is a
    /// 180° reversal of the current heading or would put the head straight
    /// onto the second segment.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.alive || direction == self.direction.opposite() {
            return false;
        }
        if let (Some(head), Some(neck)) = (self.head(), self.segment(1)) {
            if head.step(direction) == neck {
                return false;
            }
        }
        self.pending_direction = direction;
        true
    }

    /// Promote the buffered heading.
    pub fn apply_pending_direction(&mut self) {
        self.direction = self.pending_direction;
    }

    /// The cell the head would enter on the next move.
    #[must_use]
    pub fn next_head(&self) -> Option<Coord> {
        self.head().map(|head| head.step(self.direction))
    }

    /// Push a new head; drop the tail unless `grow`.
    pub fn advance(&mut self, new_head: Coord, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Remove the tail cell permanently.
    pub fn pop_tail(&mut self) -> Option<Coord> {
        self.body.pop_back()
    }

    /// Remove up to `count` tail cells without going below `floor` cells.
    ///
    /// Returns how many cells were removed.
    pub fn trim_tail(&mut self, count: usize, floor: usize) -> usize {
        let removable = self.body.len().saturating_sub(floor).min(count);
        for _ in 0..removable {
            self.body.pop_back();
        }
        removable
    }

    /// Remove the snake from play.
    pub fn eliminate(&mut self) {
        self.alive = false;
        self.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(40, 20).unwrap()
    }

    #[test]
    fn test_spawn_positions() {
        let p1 = Snake::spawn(1, &grid());
        assert_eq!(p1.len(), START_LENGTH);
        assert_eq!(p1.head(), Some(Coord::new(10, 10)));
        assert_eq!(p1.tail(), Some(Coord::new(8, 10)));
        assert_eq!(p1.direction, Direction::Right);

        let p2 = Snake::spawn(2, &grid());
        assert_eq!(p2.head(), Some(Coord::new(30, 10)));
        assert_eq!(p2.tail(), Some(Coord::new(32, 10)));
        assert_eq!(p2.direction, Direction::Left);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut snake = Snake::spawn(1, &grid());
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.pending_direction, Direction::Right);

        assert!(snake.request_direction(Direction::Up));
        assert_eq!(snake.pending_direction, Direction::Up);
    }

    #[test]
    fn test_turn_into_neck_rejected() {
        // Heading says up, but the snake has not moved since turning,
        // so its neck is still to the left.
        let mut snake = Snake::spawn(1, &grid());
        snake.request_direction(Direction::Up);
        snake.apply_pending_direction();

        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.pending_direction, Direction::Up);
    }

    #[test]
    fn test_last_writer_wins() {
        let mut snake = Snake::spawn(1, &grid());
        assert!(snake.request_direction(Direction::Up));
        assert!(snake.request_direction(Direction::Down));
        assert_eq!(snake.pending_direction, Direction::Down);
    }

    #[test]
    fn test_advance_and_grow() {
        let mut snake = Snake::spawn(1, &grid());
        let next = snake.next_head().unwrap();
        snake.advance(next, false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Some(Coord::new(11, 10)));

        let next = snake.next_head().unwrap();
        snake.advance(next, true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Some(Coord::new(9, 10)));
    }

    #[test]
    fn test_trim_respects_floor() {
        let body: Vec<Coord> = (0..5).map(|x| Coord::new(10 - x, 5)).collect();
        let mut snake = Snake::from_body(1, body, Direction::Right);
        assert_eq!(snake.trim_tail(2, 3), 2);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.trim_tail(2, 3), 0);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_eliminate_clears_body() {
        let mut snake = Snake::spawn(2, &grid());
        snake.eliminate();
        assert!(!snake.alive);
        assert!(snake.is_empty());
        assert!(!snake.request_direction(Direction::Up));
    }

    #[test]
    fn test_opponent() {
        assert_eq!(opponent(1), 2);
        assert_eq!(opponent(2), 1);
    }
}
