//! Collision resolution.
//!
//! Pure: reads the board and reports what happened, leaving the caller to
//! apply eliminations and penalties. Snakes are checked in slice order, and
//! for each snake the checks run wall, own body, opponent body, hazard. The
//! first terminal outcome decides the game; snakes after it are only checked
//! against the wall, so no live snake is left with its head off the grid.

use serde::Serialize;

use crate::game::{Coord, Grid, HazardField, PlayerId, Snake};

/// Own-body segments below this index never count as a hit.
pub const SELF_COLLISION_MIN_INDEX: usize = 4;

/// What a snake ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionKind {
    /// Left the grid.
    Wall,
    /// Hit its own body.
    SelfBody,
    /// Hit the other snake.
    Opponent,
}

impl CollisionKind {
    /// Lowercase name used in event tags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::SelfBody => "self",
            Self::Opponent => "opponent",
        }
    }
}

/// A single collision finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum CollisionOutcome {
    /// The snake is out.
    Terminal {
        /// Eliminated player.
        loser: PlayerId,
        /// What was hit.
        kind: CollisionKind,
    },
    /// The snake's head is on a hazard marker.
    HazardHit {
        /// Player whose head touched the marker.
        player: PlayerId,
        /// Marker cell.
        position: Coord,
    },
}

impl CollisionOutcome {
    /// Whether this outcome ends the game.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }
}

/// Check one snake against the board.
#[must_use]
pub fn check_snake(
    grid: &Grid,
    snake: &Snake,
    rival: Option<&Snake>,
    hazards: &HazardField,
) -> Option<CollisionOutcome> {
    if !snake.alive {
        return None;
    }
    let head = snake.head()?;
    let terminal = |kind| CollisionOutcome::Terminal {
        loser: snake.id,
        kind,
    };

    if let Some(outcome) = check_wall(grid, snake) {
        return Some(outcome);
    }
    if snake
        .segments()
        .skip(SELF_COLLISION_MIN_INDEX)
        .any(|segment| segment == head)
    {
        return Some(terminal(CollisionKind::SelfBody));
    }
    if rival.is_some_and(|r| r.alive && r.occupies(head)) {
        return Some(terminal(CollisionKind::Opponent));
    }
    if hazards.contains(head) {
        return Some(CollisionOutcome::HazardHit {
            player: snake.id,
            position: head,
        });
    }
    None
}

/// Wall check alone: a live snake whose head has left the grid.
#[must_use]
pub fn check_wall(grid: &Grid, snake: &Snake) -> Option<CollisionOutcome> {
    let head = snake.head()?;
    (snake.alive && !grid.contains(head)).then_some(CollisionOutcome::Terminal {
        loser: snake.id,
        kind: CollisionKind::Wall,
    })
}

/// Resolve collisions for every snake in slice order.
///
/// Hazard hits are collected and resolution continues. Once a terminal
/// outcome is found, later snakes are checked for the wall only, so the
/// result holds one terminal entry per snake that left the grid plus at
/// most one for any other cause.
#[must_use]
pub fn resolve_collisions(
    grid: &Grid,
    snakes: &[Snake],
    hazards: &HazardField,
) -> Vec<CollisionOutcome> {
    let mut outcomes = Vec::new();
    let mut decided = false;
    for snake in snakes {
        let outcome = if decided {
            check_wall(grid, snake)
        } else {
            let rival = snakes.iter().find(|s| s.id != snake.id);
            check_snake(grid, snake, rival, hazards)
        };
        if let Some(outcome) = outcome {
            decided |= outcome.is_terminal();
            outcomes.push(outcome);
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, HazardMarker};

    fn grid() -> Grid {
        Grid::new(20, 10).unwrap()
    }

    fn line(id: PlayerId, head: Coord, len: i32, dir: Direction) -> Snake {
        let (dx, dy) = dir.opposite().offset();
        let body: Vec<Coord> = (0..len)
            .map(|i| Coord::new(head.x + dx * i, head.y + dy * i))
            .collect();
        Snake::from_body(id, body, dir)
    }

    #[test]
    fn test_clear_board() {
        let snakes = [
            line(1, Coord::new(5, 5), 3, Direction::Right),
            line(2, Coord::new(15, 5), 3, Direction::Left),
        ];
        assert!(resolve_collisions(&grid(), &snakes, &HazardField::new()).is_empty());
    }

    #[test]
    fn test_wall() {
        let snakes = [
            line(1, Coord::new(-1, 5), 3, Direction::Left),
            line(2, Coord::new(15, 5), 3, Direction::Left),
        ];
        let outcomes = resolve_collisions(&grid(), &snakes, &HazardField::new());
        assert_eq!(
            outcomes,
            vec![CollisionOutcome::Terminal {
                loser: 1,
                kind: CollisionKind::Wall
            }]
        );
    }

    #[test]
    fn test_self_exempts_first_segments() {
        // Head at (5,5) and segment 3 at (5,5) would be a tight loop; index 3
        // is exempt, so only index 4 and beyond count.
        let body = vec![
            Coord::new(5, 5),
            Coord::new(5, 6),
            Coord::new(6, 6),
            Coord::new(5, 5),
        ];
        let snake = Snake::from_body(1, body, Direction::Up);
        assert_eq!(check_snake(&grid(), &snake, None, &HazardField::new()), None);

        let body = vec![
            Coord::new(5, 5),
            Coord::new(5, 6),
            Coord::new(6, 6),
            Coord::new(6, 5),
            Coord::new(5, 5),
        ];
        let snake = Snake::from_body(1, body, Direction::Up);
        assert_eq!(
            check_snake(&grid(), &snake, None, &HazardField::new()),
            Some(CollisionOutcome::Terminal {
                loser: 1,
                kind: CollisionKind::SelfBody
            })
        );
    }

    #[test]
    fn test_opponent_body() {
        // P2 runs (10,5)..(10,3); P1's head lands on (10,4)
        let p2 = line(2, Coord::new(10, 5), 3, Direction::Down);
        let p1 = line(1, Coord::new(10, 4), 3, Direction::Left);
        let snakes = [p1, p2];

        let outcomes = resolve_collisions(&grid(), &snakes, &HazardField::new());
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0],
            CollisionOutcome::Terminal {
                loser: 1,
                kind: CollisionKind::Opponent,
                ..
            }
        ));
    }

    #[test]
    fn test_both_off_grid_both_reported() {
        let snakes = [
            line(1, Coord::new(-1, 5), 3, Direction::Left),
            line(2, Coord::new(20, 5), 3, Direction::Right),
        ];
        let outcomes = resolve_collisions(&grid(), &snakes, &HazardField::new());
        assert_eq!(
            outcomes,
            vec![
                CollisionOutcome::Terminal {
                    loser: 1,
                    kind: CollisionKind::Wall
                },
                CollisionOutcome::Terminal {
                    loser: 2,
                    kind: CollisionKind::Wall
                },
            ]
        );
    }

    #[test]
    fn test_head_on_only_first_player_loses() {
        // Heads share (10,5): P1 is checked first and loses, P2 stays in
        let snakes = [
            line(1, Coord::new(10, 5), 3, Direction::Right),
            line(2, Coord::new(10, 5), 3, Direction::Left),
        ];
        let outcomes = resolve_collisions(&grid(), &snakes, &HazardField::new());
        assert_eq!(
            outcomes,
            vec![CollisionOutcome::Terminal {
                loser: 1,
                kind: CollisionKind::Opponent
            }]
        );
    }

    #[test]
    fn test_after_terminal_hazards_are_skipped() {
        let mut hazards = HazardField::new();
        hazards.insert(HazardMarker {
            position: Coord::new(15, 5),
            owner: 1,
        });
        let snakes = [
            line(1, Coord::new(-1, 5), 3, Direction::Left),
            line(2, Coord::new(15, 5), 3, Direction::Left),
        ];
        let outcomes = resolve_collisions(&grid(), &snakes, &hazards);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_terminal());
    }

    #[test]
    fn test_hazard_hit_continues() {
        let mut hazards = HazardField::new();
        hazards.insert(HazardMarker {
            position: Coord::new(5, 5),
            owner: 2,
        });
        let snakes = [
            line(1, Coord::new(5, 5), 3, Direction::Right),
            line(2, Coord::new(25, 5), 3, Direction::Right),
        ];
        let outcomes = resolve_collisions(&grid(), &snakes, &hazards);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes[0],
            CollisionOutcome::HazardHit {
                player: 1,
                position: Coord::new(5, 5)
            }
        );
        assert!(matches!(
            outcomes[1],
            CollisionOutcome::Terminal {
                loser: 2,
                kind: CollisionKind::Wall,
                ..
            }
        ));
    }

    #[test]
    fn test_dead_snakes_ignored() {
        let mut dead = line(1, Coord::new(-1, 5), 3, Direction::Left);
        dead.eliminate();
        assert_eq!(check_snake(&grid(), &dead, None, &HazardField::new()), None);
    }
}
