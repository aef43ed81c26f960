//! Grid geometry: coordinates, headings and bounds.

use serde::{Deserialize, Serialize};

/// A cell position.
///
/// Signed so a head that has just left the grid can be represented for the
/// single wall check that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row, growing downward).
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One of the four cardinal headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Toward column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// All headings, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The 180° reversal of this heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset `(dx, dy)` for this heading.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// The fixed-size playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid.
    ///
    /// Returns `None` if either dimension is not positive.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Whether `coord` lies on the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// The centre cell, used as the fallback spawn position.
    #[must_use]
    pub const fn center(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let c = Coord::new(5, 5);
        assert_eq!(c.step(Direction::Up), Coord::new(5, 4));
        assert_eq!(c.step(Direction::Down), Coord::new(5, 6));
        assert_eq!(c.step(Direction::Left), Coord::new(4, 5));
        assert_eq!(c.step(Direction::Right), Coord::new(6, 5));
    }

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(10, 8).unwrap();
        assert!(grid.contains(Coord::new(0, 0)));
        assert!(grid.contains(Coord::new(9, 7)));
        assert!(!grid.contains(Coord::new(-1, 0)));
        assert!(!grid.contains(Coord::new(10, 0)));
        assert!(!grid.contains(Coord::new(0, 8)));
        assert_eq!(grid.center(), Coord::new(5, 4));
    }

    #[test]
    fn test_grid_zero_size() {
        assert!(Grid::new(0, 10).is_none());
        assert!(Grid::new(10, -1).is_none());
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::new(3, 2).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[3], Coord::new(0, 1));
    }
}
