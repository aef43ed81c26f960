//! Output formatting utilities for CLI.

use gobble::engine::GameEvent;
use gobble::game::PlayerId;
use gobble::render::render_ascii;
use gobble::{Phase, Snapshot};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// JSON-serializable run result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonRunResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Ticks that advanced the simulation.
    pub(super) ticks: u64,
    /// Whether the game ended.
    pub(super) finished: bool,
    /// Winner player ID (null if unfinished or drawn).
    pub(super) winner: Option<PlayerId>,
    /// State after the last tick.
    pub(super) snapshot: Snapshot,
    /// Every event raised, in order.
    pub(super) events: Vec<GameEvent>,
}

impl JsonRunResult {
    pub(super) fn new(seed: u64, snapshot: Snapshot, events: Vec<GameEvent>) -> Self {
        Self {
            seed,
            ticks: snapshot.tick,
            finished: matches!(snapshot.phase, Phase::Over { .. }),
            winner: snapshot.winner,
            snapshot,
            events,
        }
    }
}

/// Format a run as the final board plus an event tally.
pub(super) fn format_text(
    seed: u64,
    snapshot: &Snapshot,
    events: &[GameEvent],
    color: bool,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Run Result (seed: {seed})");
    match snapshot.phase {
        Phase::Over {
            winner: Some(winner),
        } => {
            let _ = writeln!(output, "  Winner: Player {winner}");
        }
        Phase::Over { winner: None } => output.push_str("  Winner: none (draw)\n"),
        _ => output.push_str("  Winner: none (still running)\n"),
    }
    let _ = writeln!(output, "  Ticks: {}  Level: {}\n", snapshot.tick, snapshot.level);

    output.push_str(&render_ascii(snapshot, color));

    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    for event in events {
        *tally.entry(event.tag()).or_default() += 1;
    }
    if !tally.is_empty() {
        output.push_str("\nEvents:\n");
        for (tag, count) in &tally {
            let _ = writeln!(output, "  {tag:<28} {count}");
        }
    }

    output
}
