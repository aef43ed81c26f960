//! Run command implementation.

use super::output::{JsonRunResult, format_text};
use super::{CliError, OutputFormat, resolve_seed};
use gobble::engine::ScriptedIntent;
use gobble::{GameConfig, SimulationEngine};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the rules or the intent script are invalid.
pub(crate) fn execute(
    config: GameConfig,
    seed: Option<u64>,
    ticks: u64,
    format: OutputFormat,
    intents: Option<PathBuf>,
    color: bool,
) -> Result<(), CliError> {
    let script = match intents {
        Some(path) => load_script(&path)?,
        None => Vec::new(),
    };

    let seed = resolve_seed(seed);
    let mut engine = SimulationEngine::seeded(config, seed)?;
    engine.start();
    let mut events = engine.take_events();

    let mut pending = script.iter().peekable();
    for tick in 1..=ticks {
        while let Some(scripted) = pending.next_if(|s| s.tick <= tick) {
            debug!(tick, intent = ?scripted.intent, "scripted intent");
            engine.input().push(scripted.intent);
        }
        engine.apply_controls();
        events.append(&mut engine.take_events());

        let report = engine.tick();
        events.extend(report.events);
        if engine.state().is_over() {
            break;
        }
    }

    let snapshot = engine.snapshot();
    info!(seed, ticks = snapshot.tick, winner = ?snapshot.winner, "headless run finished");

    match format {
        OutputFormat::Text => print!("{}", format_text(seed, &snapshot, &events, color)),
        OutputFormat::Json => {
            let result = JsonRunResult::new(seed, snapshot, events);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

/// Read a JSON array of scripted intents, ordered by tick.
fn load_script(path: &Path) -> Result<Vec<ScriptedIntent>, CliError> {
    let json = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    let mut script: Vec<ScriptedIntent> = serde_json::from_str(&json)?;
    script.sort_by_key(|s| s.tick);
    Ok(script)
}
