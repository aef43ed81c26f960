//! Integration tests driving whole games through the public API.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use gobble::config::{FoodRules, HazardRules, LevelRules};
use gobble::engine::{GameEvent, Intent, ScriptedIntent};
use gobble::game::{CollisionKind, Coord, Direction, FoodKind, Phase, invariants::check_invariants};
use gobble::scheduler::SchedulerState;
use gobble::{GameConfig, ManualClock, ScriptedRandom, Session, SimulationEngine};

/// 40x30 arena with a single food slot so nothing spawns in the way.
fn quiet_config() -> GameConfig {
    GameConfig {
        grid_width: 40,
        grid_height: 30,
        food: FoodRules {
            min_food: 1,
            max_food: 1,
            ..FoodRules::default()
        },
        ..GameConfig::default()
    }
}

/// Smallest legal arena: three rows, heads at (2,1) and (7,1).
fn narrow_config() -> GameConfig {
    GameConfig {
        grid_width: 10,
        grid_height: 3,
        ..quiet_config()
    }
}

fn engine(config: GameConfig) -> SimulationEngine<ScriptedRandom> {
    let mut engine = SimulationEngine::new(config, ScriptedRandom::constant(0.0)).unwrap();
    engine.start();
    let started = engine.take_events();
    assert!(matches!(
        started[..],
        [GameEvent::GameStarted, GameEvent::FoodSpawned { food_kind: FoodKind::Vegetable, .. }]
    ));
    engine
}

fn session(config: GameConfig) -> (ManualClock, Session<ScriptedRandom, ManualClock>) {
    let engine = SimulationEngine::new(config, ScriptedRandom::constant(0.0)).unwrap();
    let clock = ManualClock::new();
    (clock.clone(), Session::new(engine, clock))
}

/// Player 2 turns away from the middle row so player 1 has the centre to itself.
fn clear_lane<R: gobble::RandomSource>(engine: &mut SimulationEngine<R>) {
    assert!(engine.steer(2, Direction::Up));
}

#[test]
fn test_eating_the_centre_vegetable() {
    let mut engine = engine(quiet_config());
    clear_lane(&mut engine);

    let start = engine.snapshot();
    let lettuce = start.food_at(Coord::new(20, 15)).unwrap();
    assert_eq!(lettuce.kind, FoodKind::Vegetable);
    assert_eq!(lettuce.name, "Lettuce");

    for _ in 0..9 {
        engine.tick();
    }
    let report = engine.tick();
    let p1 = report.snapshot.agent(1).unwrap();

    assert_eq!(p1.body[0], Coord::new(20, 15));
    assert_eq!(p1.len(), 4);
    assert_eq!(p1.ledger.score, 25);
    assert_eq!(p1.ledger.calories, 5);
    assert_eq!(p1.ledger.level_progress, 25);
    assert!(report.snapshot.food_at(Coord::new(20, 15)).is_none());
    assert!(report.events.iter().any(|e| matches!(
        e,
        GameEvent::FoodEaten { agent_id: 1, food_kind: FoodKind::Vegetable, .. }
    )));
    // The eaten vegetable is replaced at once
    assert_eq!(report.snapshot.food.len(), 1);
    assert_eq!(report.snapshot.food[0].kind, FoodKind::Vegetable);
}

#[test]
fn test_wall_collision_ends_game_and_stops_timer() {
    let (clock, mut session) = session(quiet_config());
    session.start();
    assert!(session.engine_mut().steer(1, Direction::Up));

    let mut reports = Vec::new();
    for _ in 0..40 {
        clock.advance(session.engine().tick_period());
        if let Some(report) = session.pump() {
            let over = report.finished();
            reports.push(report);
            if over {
                break;
            }
        }
    }

    let last = reports.last().unwrap();
    // Head reaches row 0 after 15 ticks and leaves the grid on the 16th
    assert_eq!(last.snapshot.tick, 16);
    assert_eq!(last.winner(), Some(2));
    assert!(last.events.iter().any(|e| matches!(
        e,
        GameEvent::Collision { agent_id: 1, collision: CollisionKind::Wall }
    )));
    assert_eq!(last.snapshot.phase, Phase::Over { winner: Some(2) });
    assert!(!last.snapshot.agent(1).unwrap().alive);
    assert!(last.snapshot.agent(1).unwrap().is_empty());
    assert_eq!(session.scheduler().state(), SchedulerState::Stopped);

    // Frozen until restart
    clock.advance(session.engine().tick_period() * 3);
    assert!(session.pump().is_none());
    assert_eq!(session.engine().state().tick, 16);
    assert!(!session.engine_mut().steer(2, Direction::Up));

    session.engine().input().request_restart();
    assert!(session.pump().is_none());
    assert_eq!(session.engine().phase(), Phase::Running);
    assert_eq!(session.scheduler().state(), SchedulerState::Running);
    assert_eq!(session.engine().state().tick, 0);
}

#[test]
fn test_both_snakes_leaving_the_grid_is_a_draw() {
    let (clock, mut session) = session(narrow_config());
    session.start();
    assert!(session.engine_mut().steer(1, Direction::Up));
    assert!(session.engine_mut().steer(2, Direction::Up));

    let mut reports = Vec::new();
    for _ in 0..2 {
        clock.advance(session.engine().tick_period());
        reports.push(session.pump().unwrap());
    }

    // Row 0 after the first tick, off the top edge after the second
    assert_eq!(reports[0].snapshot.agent(1).unwrap().body[0], Coord::new(2, 0));
    assert_eq!(reports[0].snapshot.agent(2).unwrap().body[0], Coord::new(7, 0));
    assert!(!reports[0].finished());

    let last = &reports[1];
    assert!(last.finished());
    assert_eq!(last.winner(), None);
    let collisions: Vec<_> = last
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Collision { agent_id, collision } => Some((*agent_id, *collision)),
            _ => None,
        })
        .collect();
    assert_eq!(collisions, vec![(1, CollisionKind::Wall), (2, CollisionKind::Wall)]);
    assert!(last.events.contains(&GameEvent::GameOver { winner_id: None }));

    assert_eq!(last.snapshot.phase, Phase::Over { winner: None });
    assert!(last.snapshot.agents.iter().all(|a| !a.alive && a.is_empty()));
    assert!(check_invariants(session.engine().state()).is_empty());
    assert_eq!(session.scheduler().state(), SchedulerState::Stopped);

    clock.advance(session.engine().tick_period() * 3);
    assert!(session.pump().is_none());
    assert_eq!(session.engine().state().tick, 2);
}

#[test]
fn test_head_on_meeting_eliminates_player_one() {
    let mut engine = engine(quiet_config());

    // Heads close from (10,15) and (30,15) and meet on the centre at tick 10
    let mut report = engine.tick();
    while !report.finished() {
        assert!(report.snapshot.tick < 10);
        report = engine.tick();
    }

    assert_eq!(report.snapshot.tick, 10);
    assert_eq!(report.winner(), Some(2));
    assert!(report.events.iter().any(|e| matches!(
        e,
        GameEvent::Collision { agent_id: 1, collision: CollisionKind::Opponent }
    )));
    assert!(!report.events.iter().any(|e| matches!(
        e,
        GameEvent::Collision { agent_id: 2, .. }
    )));

    let p2 = report.snapshot.agent(2).unwrap();
    assert!(p2.alive);
    assert_eq!(p2.body[0], Coord::new(20, 15));
    assert!(!report.snapshot.agent(1).unwrap().alive);
    assert_eq!(report.snapshot.phase, Phase::Over { winner: Some(2) });
    assert!(check_invariants(engine.state()).is_empty());
}

#[test]
fn test_illegal_turn_does_not_replace_a_legal_one() {
    let mut engine = engine(narrow_config());
    let input = engine.input();

    // Heading right: Up is accepted, Left is a reversal and is dropped
    input.push_direction(1, Direction::Up);
    input.push_direction(1, Direction::Left);
    let report = engine.tick();

    let p1 = report.snapshot.agent(1).unwrap();
    assert_eq!(p1.body[0], Coord::new(2, 0));
    assert_eq!(p1.direction, Direction::Up);
}

#[test]
fn test_hazard_drop_and_hit() {
    let config = GameConfig {
        hazard: HazardRules {
            min_length: 3,
            ..HazardRules::default()
        },
        ..quiet_config()
    };
    let mut engine = engine(config);

    // Tail of the starting body is (8, 15)
    let marker = engine.drop_hazard(1).unwrap();
    assert_eq!(marker.position, Coord::new(8, 15));
    assert_eq!(marker.owner, 1);
    let events = engine.take_events();
    assert!(matches!(events[..], [GameEvent::HazardDropped { agent_id: 1, .. }]));

    let p1 = engine.state().snake(1).unwrap();
    assert_eq!(p1.len(), 2);
    assert!((p1.speed_factor - 0.95).abs() < 1e-9);
    assert!((p1.girth_factor - 0.9).abs() < 1e-9);

    // Now too short for another drop
    assert!(matches!(
        engine.drop_hazard(1),
        Err(gobble::game::DropRejection::TooShort { length: 2 })
    ));
    engine.take_events();

    // Loop back onto the marker: up, left, down, left
    let mut hit = None;
    for direction in [Direction::Up, Direction::Left, Direction::Down, Direction::Left] {
        assert!(engine.steer(1, direction));
        let report = engine.tick();
        if let Some(event) = report
            .events
            .iter()
            .find(|e| matches!(e, GameEvent::HazardHit { .. }))
        {
            hit = Some((*event, report.snapshot.tick));
        }
    }

    let (event, tick) = hit.unwrap();
    assert_eq!(tick, 4);
    assert!(matches!(
        event,
        GameEvent::HazardHit { agent_id: 1, position, penalty: 1000 } if position == Coord::new(8, 15)
    ));
    assert!(engine.state().hazards.is_empty());
    // The penalty cannot push the score below zero
    assert_eq!(engine.state().score(1).unwrap().score, 0);
    assert!(engine.state().is_running());
}

#[test]
fn test_level_up_resets_progress_and_speeds_timer() {
    let config = GameConfig {
        levels: LevelRules {
            threshold: 25,
            ..LevelRules::default()
        },
        ..quiet_config()
    };
    let (clock, mut session) = session(config);
    session.start();
    assert!(session.engine_mut().steer(2, Direction::Up));

    let mut level_up = None;
    for _ in 0..10 {
        clock.advance(session.engine().tick_period());
        let report = session.pump().unwrap();
        if report.level_up().is_some() {
            level_up = Some(report);
        }
    }

    let report = level_up.unwrap();
    assert_eq!(report.snapshot.tick, 10);
    assert_eq!(report.level_up(), Some(2));
    assert_eq!(report.snapshot.level, 2);
    assert!((report.snapshot.speed_multiplier - 1.1).abs() < 1e-9);
    assert!((report.snapshot.sweet_probability - 0.156).abs() < 1e-9);
    for agent in &report.snapshot.agents {
        assert_eq!(agent.ledger.level_progress, 0);
        assert!((agent.speed_factor - 1.05).abs() < 1e-9);
    }
    // Score survives the progress reset
    assert_eq!(report.snapshot.agent(1).unwrap().ledger.score, 25);
    // Food is reset to a single vegetable
    assert_eq!(report.snapshot.food.len(), 1);
    assert_eq!(report.snapshot.food[0].kind, FoodKind::Vegetable);

    let expected = session.engine().config().tick_period(2);
    assert_eq!(session.engine().tick_period(), expected);
    assert_eq!(session.scheduler().period(), expected);
}

#[test]
fn test_max_level_is_never_exceeded() {
    let config = GameConfig {
        levels: LevelRules {
            max_level: 1,
            threshold: 25,
            ..LevelRules::default()
        },
        ..quiet_config()
    };
    let mut engine = engine(config);
    clear_lane(&mut engine);

    for _ in 0..10 {
        let report = engine.tick();
        assert!(report.level_up().is_none());
    }
    assert_eq!(engine.state().level.level, 1);
    // Progress keeps accumulating at the cap
    assert_eq!(engine.state().score(1).unwrap().level_progress, 25);
}

#[test]
fn test_pause_freezes_logical_clock() {
    let mut engine = engine(quiet_config());
    engine.tick();
    let now = engine.state().now_ms;

    assert!(engine.pause());
    for _ in 0..5 {
        let report = engine.tick();
        assert!(!report.advanced);
    }
    assert_eq!(engine.state().now_ms, now);
    assert_eq!(engine.state().tick, 1);

    assert!(engine.resume());
    assert!(engine.tick().advanced);
    assert_eq!(engine.state().tick, 2);
}

#[test]
fn test_scripted_intents_parse_and_apply() {
    let json = r#"[
        {"tick": 1, "intent": "steer", "player": 2, "direction": "up"},
        {"tick": 3, "intent": "toggle-pause"}
    ]"#;
    let script: Vec<ScriptedIntent> = serde_json::from_str(json).unwrap();
    assert_eq!(script.len(), 2);
    assert!(matches!(
        script[0].intent,
        Intent::Steer { player: 2, direction: Direction::Up }
    ));

    let mut engine = engine(quiet_config());
    for tick in 1..=4u64 {
        for scripted in script.iter().filter(|s| s.tick == tick) {
            engine.input().push(scripted.intent);
        }
        engine.apply_controls();
        engine.tick();
    }
    // Paused before tick 3, so only two ticks ran
    assert_eq!(engine.state().tick, 2);
    assert_eq!(engine.phase(), Phase::Paused);
    assert_eq!(engine.state().snake(2).unwrap().head(), Some(Coord::new(30, 13)));
}

#[test]
fn test_seeded_runs_stay_consistent() {
    let config = GameConfig::default();
    let mut engine = SimulationEngine::seeded(config, 7).unwrap();
    engine.start();
    for _ in 0..300 {
        engine.tick();
        assert!(check_invariants(engine.state()).is_empty());
        if engine.state().is_over() {
            break;
        }
    }
}
