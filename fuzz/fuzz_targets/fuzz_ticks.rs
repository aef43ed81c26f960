#![no_main]

//! Whole-game fuzzer.
//!
//! Drives a small arena with arbitrary steering, hazard drops, pauses and
//! restarts, checking invariants after every tick.

use arbitrary::Arbitrary;
use gobble::config::HazardRules;
use gobble::game::invariants::check_invariants;
use gobble::{Direction, GameConfig, SimulationEngine};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated player action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Steer { player: u8, direction: u8 },
    DropHazard { player: u8 },
    TogglePause,
    Restart,
    Wait,
}

/// Structured input for a fuzzed game.
#[derive(Arbitrary, Debug)]
struct GameInput {
    seed: u64,
    width: u8,
    height: u8,
    hazard_cooldown: u16,
    actions: Vec<FuzzAction>,
}

fn direction(code: u8) -> Direction {
    match code % 4 {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    }
}

fuzz_target!(|input: GameInput| {
    let config = GameConfig {
        grid_width: 10 + i32::from(input.width % 30),
        grid_height: 3 + i32::from(input.height % 30),
        hazard: HazardRules {
            min_length: 3,
            cooldown_ms: u64::from(input.hazard_cooldown),
            ..HazardRules::default()
        },
        ..GameConfig::default()
    };
    let Ok(mut engine) = SimulationEngine::seeded(config, input.seed) else {
        return;
    };
    engine.start();

    for (tick, action) in input.actions.iter().take(2000).enumerate() {
        match *action {
            // Player ids outside 1..=2 must be ignored, not panic
            FuzzAction::Steer { player, direction: d } => {
                engine.steer(player % 4, direction(d));
            }
            FuzzAction::DropHazard { player } => {
                let _ = engine.drop_hazard(player % 4);
            }
            FuzzAction::TogglePause => {
                engine.input().request_pause_toggle();
            }
            FuzzAction::Restart => {
                engine.input().request_restart();
            }
            FuzzAction::Wait => {}
        }
        engine.apply_controls();
        let report = engine.tick();

        let violations = check_invariants(engine.state());
        assert!(
            violations.is_empty(),
            "Invariants violated after action {}: {:?}",
            tick,
            violations
        );
        if report.advanced {
            assert_eq!(report.snapshot.tick, engine.state().tick);
        }
    }
});
