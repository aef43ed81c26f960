#![no_main]

//! Rules-file fuzzer.
//!
//! Any JSON that passes validation must describe a game that starts and
//! ticks without panicking.

use gobble::{GameConfig, SimulationEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = GameConfig::from_json_str(text) else {
        return;
    };
    // Keep runtime bounded
    if config.grid_width > 200 || config.grid_height > 200 {
        return;
    }

    let mut engine = SimulationEngine::seeded(config, 0).expect("validated config");
    engine.start();
    for _ in 0..50 {
        engine.tick();
    }
    let _ = config.tick_period(u32::MAX);
});
