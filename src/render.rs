//! ASCII renderer for terminal viewing with optional ANSI colors.

// Grid dimensions are validated positive
#![allow(clippy::cast_sign_loss)]

use std::fmt::Write as _;

use crate::engine::Snapshot;
use crate::game::{Coord, FoodKind, Phase, PlayerId};

const PLAYER_COLORS: [&str; 2] = [
    "\x1b[31m", // Player 1: Red
    "\x1b[34m", // Player 2: Blue
];

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const GRAY: &str = "\x1b[90m";
const WHITE: &str = "\x1b[37m";

/// What occupies a cell, in drawing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Nothing.
    Empty,
    /// A snake head.
    Head(PlayerId),
    /// A snake body segment.
    Body(PlayerId),
    /// A hazard marker.
    Hazard,
    /// A food item.
    Food(FoodKind),
}

impl Glyph {
    /// Single-character form.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Head(1) => 'A',
            Self::Head(_) => 'B',
            Self::Body(1) => 'a',
            Self::Body(_) => 'b',
            Self::Hazard => '*',
            Self::Food(FoodKind::Vegetable) => 'v',
            Self::Food(FoodKind::Fruit) => 'f',
            Self::Food(FoodKind::Sweet) => 's',
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Empty => GRAY,
            Self::Head(id) | Self::Body(id) => player_color(id),
            Self::Hazard => MAGENTA,
            Self::Food(FoodKind::Vegetable) => GREEN,
            Self::Food(FoodKind::Fruit) => YELLOW,
            Self::Food(FoodKind::Sweet) => WHITE,
        }
    }
}

/// Row-major glyph grid for a snapshot. Off-grid cells are skipped.
#[must_use]
pub fn glyph_grid(snapshot: &Snapshot) -> Vec<Vec<Glyph>> {
    let width = snapshot.grid.width() as usize;
    let height = snapshot.grid.height() as usize;
    let mut cells = vec![vec![Glyph::Empty; width]; height];

    let mut paint = |coord: Coord, glyph: Glyph| {
        if snapshot.grid.contains(coord) {
            cells[coord.y as usize][coord.x as usize] = glyph;
        }
    };

    // Lowest priority first so later writes win
    for food in &snapshot.food {
        paint(food.position, Glyph::Food(food.kind));
    }
    for marker in &snapshot.hazards {
        paint(marker.position, Glyph::Hazard);
    }
    for agent in &snapshot.agents {
        for cell in agent.body.iter().skip(1) {
            paint(*cell, Glyph::Body(agent.id));
        }
    }
    for agent in &snapshot.agents {
        if let Some(head) = agent.body.first() {
            paint(*head, Glyph::Head(agent.id));
        }
    }
    cells
}

/// Render a snapshot to text.
///
/// Output format:
/// ```text
/// Tick 42  Level 1  x1.0  RUNNING
/// ┌─────────────────────┐
/// │ . . . . . . . . . . │
/// │ . . a a A . v . . . │
/// └─────────────────────┘
///
/// Legend: A/B=Head  a/b=Body  v=Vegetable  f=Fruit  s=Sweet  *=Hazard
///
/// Player 1:  Length: 3   Score: 25     Calories: 5     Progress: 25
/// Player 2:  Length: 3   Score: 0      Calories: 0     Progress: 0
/// ```
#[must_use]
pub fn render_ascii(snapshot: &Snapshot, color: bool) -> String {
    let mut output = String::new();
    render_header(&mut output, snapshot);
    render_board(&mut output, snapshot, color);
    output.push_str("\nLegend: A/B=Head  a/b=Body  v=Vegetable  f=Fruit  s=Sweet  *=Hazard\n\n");
    render_player_stats(&mut output, snapshot, color);
    output
}

/// Short status word for a phase.
#[must_use]
pub fn phase_label(phase: Phase) -> String {
    match phase {
        Phase::Ready => "READY".to_string(),
        Phase::Running => "RUNNING".to_string(),
        Phase::Paused => "PAUSED".to_string(),
        Phase::Over {
            winner: Some(winner),
        } => format!("GAME OVER - Player {winner} wins"),
        Phase::Over { winner: None } => "GAME OVER - Draw".to_string(),
    }
}

fn render_header(output: &mut String, snapshot: &Snapshot) {
    let _ = writeln!(
        output,
        "Tick {}  Level {}  x{:.1}  {}",
        snapshot.tick,
        snapshot.level,
        snapshot.speed_multiplier,
        phase_label(snapshot.phase)
    );
}

fn render_board(output: &mut String, snapshot: &Snapshot, color: bool) {
    let cells = glyph_grid(snapshot);
    let width = snapshot.grid.width() as usize;

    output.push('┌');
    output.push_str(&"─".repeat(width * 2 + 1));
    output.push_str("┐\n");

    for row in &cells {
        output.push_str("│ ");
        for glyph in row {
            if color {
                let _ = write!(output, "{}{}{RESET} ", glyph.color(), glyph.symbol());
            } else {
                output.push(glyph.symbol());
                output.push(' ');
            }
        }
        output.push_str("│\n");
    }

    output.push('└');
    output.push_str(&"─".repeat(width * 2 + 1));
    output.push_str("┘\n");
}

fn render_player_stats(output: &mut String, snapshot: &Snapshot, color: bool) {
    for agent in &snapshot.agents {
        let (start, end) = match (color, agent.alive) {
            (false, _) => ("", ""),
            (true, true) => (player_color(agent.id), RESET),
            (true, false) => (DIM, RESET),
        };
        let bold = if color { BOLD } else { "" };
        let status = if agent.alive { "" } else { "  ELIMINATED" };
        let _ = writeln!(
            output,
            "{start}{bold}Player {}:{end}  Length: {:<3} Score: {:<6} Calories: {:<5} Progress: {}{status}",
            agent.id,
            agent.len(),
            agent.ledger.score,
            agent.ledger.calories,
            agent.ledger.level_progress,
        );
    }
}

fn player_color(player_id: PlayerId) -> &'static str {
    let idx = usize::from(player_id).saturating_sub(1);
    PLAYER_COLORS.get(idx).copied().unwrap_or(WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::SimulationEngine;
    use crate::rng::ScriptedRandom;

    fn snapshot() -> Snapshot {
        let config = GameConfig {
            grid_width: 12,
            grid_height: 4,
            ..GameConfig::default()
        };
        let mut engine = SimulationEngine::new(config, ScriptedRandom::constant(0.0)).unwrap();
        engine.start();
        engine.snapshot()
    }

    #[test]
    fn test_glyph_grid_positions() {
        let snapshot = snapshot();
        let cells = glyph_grid(&snapshot);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0].len(), 12);
        // P1 head (3,2) facing right, P2 head (9,2) facing left
        assert_eq!(cells[2][3], Glyph::Head(1));
        assert_eq!(cells[2][1], Glyph::Body(1));
        assert_eq!(cells[2][9], Glyph::Head(2));
        assert_eq!(cells[2][11], Glyph::Body(2));
        // Start vegetable at the centre
        assert_eq!(cells[2][6], Glyph::Food(FoodKind::Vegetable));
        assert_eq!(cells[0][0], Glyph::Empty);
    }

    #[test]
    fn test_render_plain() {
        let output = render_ascii(&snapshot(), false);
        assert!(output.contains("Tick 0  Level 1"));
        assert!(output.contains("RUNNING"));
        assert!(output.contains("│ . a a A . . v . . B b b │"));
        assert!(output.contains("Legend"));
        assert!(output.contains("Player 1:"));
        assert!(output.contains("Player 2:"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_render_color() {
        let output = render_ascii(&snapshot(), true);
        assert!(output.contains(RESET));
    }

    #[test]
    fn test_phase_label() {
        assert_eq!(
            phase_label(Phase::Over { winner: Some(2) }),
            "GAME OVER - Player 2 wins"
        );
        assert_eq!(phase_label(Phase::Over { winner: None }), "GAME OVER - Draw");
        assert_eq!(phase_label(Phase::Paused), "PAUSED");
    }
}
