//! Tests for the simulation engine: phase transitions, the per-tick pipeline,
//! and the end-to-end game scenarios.

use skyrunner_core::commands::{InputEvent, Key};
use skyrunner_core::components::Vehicle;
use skyrunner_core::enums::*;
use skyrunner_core::events::GameEvent;
use skyrunner_core::state::GameStateSnapshot;
use skyrunner_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

/// Engine that has already processed the start click.
fn started() -> SimulationEngine {
    let mut engine = engine();
    engine.queue_input(InputEvent::PointerClick);
    engine.tick().unwrap();
    assert_eq!(engine.phase(), GamePhase::Playing);
    engine
}

/// Started engine with the random wave removed.
fn empty_field() -> SimulationEngine {
    let mut engine = started();
    engine.clear_enemies();
    engine
}

fn down(key: Key) -> InputEvent {
    InputEvent::KeyDown { key }
}

fn up(key: Key) -> InputEvent {
    InputEvent::KeyUp { key }
}

fn press(engine: &mut SimulationEngine, key: Key) -> GameStateSnapshot {
    engine.queue_input(down(key));
    engine.tick().unwrap()
}

fn run(engine: &mut SimulationEngine, ticks: usize) -> GameStateSnapshot {
    let mut snap = engine.snapshot();
    for _ in 0..ticks {
        snap = engine.tick().unwrap();
    }
    snap
}

fn vehicle(engine: &SimulationEngine) -> Vehicle {
    *engine.world().get::<&Vehicle>(engine.player()).unwrap()
}

fn game_over(snap: &GameStateSnapshot) -> Option<(Outcome, Option<DefeatCause>)> {
    snap.events.iter().find_map(|e| match e {
        GameEvent::GameOver { outcome, cause } => Some((*outcome, *cause)),
        _ => None,
    })
}

// ---- Determinism ----

fn scripted_inputs(tick: u64) -> Vec<InputEvent> {
    match tick {
        0 => vec![InputEvent::PointerClick],
        1 => vec![down(Key::W)],
        t if t % 20 == 0 => vec![down(Key::Space), up(Key::Space)],
        t if t % 90 == 0 => vec![down(Key::ArrowLeft)],
        t if t % 90 == 45 => vec![up(Key::ArrowLeft)],
        _ => Vec::new(),
    }
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for tick in 0..600 {
        engine_a.queue_inputs(scripted_inputs(tick));
        engine_b.queue_inputs(scripted_inputs(tick));
        let snap_a = engine_a.tick().unwrap();
        let snap_b = engine_b.tick().unwrap();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    assert_ne!(engine_a.snapshot().enemies, engine_b.snapshot().enemies);
}

// ---- Construction ----

#[test]
fn test_initial_wave() {
    let engine = engine();
    let snap = engine.snapshot();

    assert_eq!(snap.phase, GamePhase::NotStarted);
    assert_eq!(snap.enemies.len(), 10);
    assert!(snap.projectiles.is_empty());
    assert_eq!(engine.presentation().len(), 11);

    for (i, enemy) in snap.enemies.iter().enumerate() {
        assert_eq!(enemy.enemy_id, i as u64);
        assert!((-1500.0..-500.0).contains(&enemy.position.x));
        assert_eq!(enemy.position.y, 0.0);
        assert!((-200.0..200.0).contains(&enemy.position.z));
    }

    let pursuers: Vec<_> = engine
        .world()
        .query::<&skyrunner_core::components::Pursuer>()
        .iter()
        .map(|(_, p)| *p)
        .collect();
    for p in pursuers {
        assert!((0.2..0.5).contains(&p.speed));
        assert!((2000.0..6000.0).contains(&p.shoot_interval_ms));
        assert_eq!(p.last_shot_ms, 0.0);
    }
}

#[test]
fn test_clock_runs_before_start_but_world_is_frozen() {
    let mut engine = engine();
    let before = engine.snapshot().enemies;
    let snap = run(&mut engine, 3);

    assert_eq!(snap.time.tick, 3);
    assert!((snap.time.elapsed_ms - 50.0).abs() < 1e-9);
    assert_eq!(snap.phase, GamePhase::NotStarted);
    assert_eq!(snap.enemies, before);
}

// ---- Start ----

#[test]
fn test_fresh_start() {
    let mut engine = engine();
    engine.queue_input(InputEvent::PointerClick);
    let snap = engine.tick().unwrap();

    assert_eq!(snap.phase, GamePhase::Playing);
    assert!(snap.events.contains(&GameEvent::GameStarted));
    assert_eq!(snap.vehicle.health, 10);
    assert_eq!(snap.vehicle.speed, 0.0);
    assert_eq!(snap.score.score, 0.0);
    assert_eq!(snap.score.enemies_destroyed, 0);
    assert_eq!(snap.score.total_enemies, 10);
    assert_eq!(snap.hud.enemies_remaining, 10);
    assert_eq!(snap.hud.speed, 0);
}

#[test]
fn test_any_key_starts() {
    let mut engine = engine();
    let snap = press(&mut engine, Key::Other);
    assert_eq!(snap.phase, GamePhase::Playing);
}

#[test]
fn test_start_while_playing_changes_nothing() {
    let mut engine = started();
    run(&mut engine, 5);

    let before = serde_json::to_string(&engine.snapshot()).unwrap();
    engine.start().unwrap();
    let after = serde_json::to_string(&engine.snapshot()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_starting_key_is_not_held() {
    let mut engine = engine();
    press(&mut engine, Key::W);
    run(&mut engine, 5);
    assert_eq!(vehicle(&engine).speed, 0.0);

    press(&mut engine, Key::W);
    assert!((vehicle(&engine).speed - 0.025).abs() < 1e-12);
}

// ---- Vehicle ----

#[test]
fn test_throttle_follows_held_keys() {
    let mut engine = empty_field();
    press(&mut engine, Key::W);
    run(&mut engine, 9);
    let speed = vehicle(&engine).speed;
    assert!((speed - 0.25).abs() < 1e-9);

    engine.queue_input(up(Key::W));
    run(&mut engine, 10);
    assert_eq!(vehicle(&engine).speed, speed);
}

#[test]
fn test_vehicle_drives_toward_negative_x() {
    let mut engine = empty_field();
    press(&mut engine, Key::W);
    let x0 = engine.snapshot().vehicle.position.x;
    run(&mut engine, 20);
    let snap = engine.snapshot();
    assert!(snap.vehicle.position.x < x0);
    assert!(snap.score.score > 0.0);
    assert_eq!(snap.camera.target, snap.vehicle.position);
}

#[test]
fn test_arrow_keys_strafe() {
    let mut engine = empty_field();
    press(&mut engine, Key::ArrowUp);
    run(&mut engine, 4);
    engine.queue_input(up(Key::ArrowUp));
    press(&mut engine, Key::ArrowRight);
    let snap = run(&mut engine, 1);

    assert_eq!(snap.vehicle.position.y, 5.0);
    assert_eq!(snap.vehicle.position.z, -2.0);
    assert_eq!(snap.hud.altitude, 5);
}

// ---- Projectiles ----

#[test]
fn test_projectile_range_law() {
    let mut engine = empty_field();
    let snap = press(&mut engine, Key::Space);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].position, Position::new(-25.0, 0.0, 0.0));

    // 98 advances: 995 units out.
    let snap = run(&mut engine, 97);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].position.x, -995.0);

    // 99 advances: 1005 units out.
    let snap = run(&mut engine, 1);
    assert!(snap.projectiles.is_empty());
    assert_eq!(engine.presentation().count(RenderKind::PlayerProjectile), 0);
}

#[test]
fn test_fire_rate_limit() {
    let mut engine = empty_field();
    engine.queue_inputs([down(Key::Space), down(Key::Space)]);
    let snap = engine.tick().unwrap();
    assert_eq!(snap.projectiles.len(), 1);

    // 283 ms after the accepted shot.
    run(&mut engine, 16);
    let snap = press(&mut engine, Key::Space);
    assert_eq!(snap.projectiles.len(), 1);

    // 316 ms after.
    run(&mut engine, 1);
    let snap = press(&mut engine, Key::Space);
    assert_eq!(snap.projectiles.len(), 2);
}

#[test]
fn test_cooldown_boundary_holds_late_in_session() {
    // 18 ticks is exactly the 300 ms cooldown, wherever the round starts.
    for offset in (0..40).chain([5_000]) {
        let mut engine = empty_field();
        run(&mut engine, offset);
        press(&mut engine, Key::Space);
        run(&mut engine, 17);
        let snap = press(&mut engine, Key::Space);
        assert_eq!(snap.projectiles.len(), 2, "second shot rejected after {offset} ticks");
    }
}

#[test]
fn test_fire_outside_playing_is_ignored() {
    let mut engine = engine();
    assert!(!engine.fire().unwrap());
    assert!(engine.snapshot().projectiles.is_empty());
}

// ---- Scenarios ----

#[test]
fn test_player_shot_destroys_enemy() {
    let mut engine = empty_field();
    let enemy_id = engine.spawn_test_enemy(Position::new(-100.0, 0.0, 0.0), 0.0, 1e9);

    press(&mut engine, Key::Space);
    let snap = run(&mut engine, 6);
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.projectiles[0].position.x, -85.0);

    let snap = run(&mut engine, 1);
    assert!(snap.enemies.is_empty());
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.score.enemies_destroyed, 1);
    assert_eq!(snap.score.score, 100.0);
    assert_eq!(snap.hud.enemies_remaining, 9);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::EnemyDestroyed { enemy_id: id, .. } if *id == enemy_id
    )));
    assert_eq!(engine.presentation().len(), 1);
}

#[test]
fn test_last_kill_is_victory() {
    let mut engine = empty_field();
    engine.score_mut().enemies_destroyed = 9;
    engine.spawn_test_enemy(Position::new(-100.0, 0.0, 0.0), 0.0, 1e9);

    press(&mut engine, Key::W);
    run(&mut engine, 3);
    assert!(vehicle(&engine).speed > 0.0);

    let mut snap = press(&mut engine, Key::Space);
    for _ in 0..30 {
        if snap.phase != GamePhase::Playing {
            break;
        }
        snap = engine.tick().unwrap();
    }

    assert_eq!(snap.phase, GamePhase::Victory);
    assert_eq!(snap.vehicle.speed, 0.0);
    assert_eq!(snap.score.enemies_destroyed, 10);
    assert_eq!(snap.hud.enemies_remaining, 0);
    assert_eq!(game_over(&snap), Some((Outcome::Victory, None)));

    let notification = snap.notification.unwrap();
    assert_eq!(notification.outcome, Outcome::Victory);
    assert!(notification.final_score >= 100.0);
    assert!(notification.message().starts_with("Victory!"));
}

#[test]
fn test_contact_is_defeat_regardless_of_health() {
    let mut engine = empty_field();
    engine.spawn_test_enemy(Position::new(5.0, 0.0, 0.0), 0.0, 1e9);

    let snap = run(&mut engine, 1);
    assert_eq!(snap.phase, GamePhase::Defeat);
    assert_eq!(snap.vehicle.health, 10);
    assert_eq!(snap.vehicle.speed, 0.0);
    assert_eq!(game_over(&snap), Some((Outcome::Defeat, Some(DefeatCause::Rammed))));
    assert_eq!(snap.notification.map(|n| n.outcome), Some(Outcome::Defeat));
}

#[test]
fn test_victory_beats_simultaneous_contact() {
    let mut engine = empty_field();
    engine.score_mut().enemies_destroyed = 9;
    engine.spawn_test_enemy(Position::new(-20.0, 0.0, 0.0), 0.0, 1e9);
    engine.spawn_test_enemy(Position::new(15.0, 0.0, 0.0), 0.0, 1e9);

    let snap = press(&mut engine, Key::Space);
    assert_eq!(snap.phase, GamePhase::Victory);
    assert_eq!(game_over(&snap), Some((Outcome::Victory, None)));
}

/// Enemy parked 200 units ahead, firing every tick.
fn under_fire(health: u32) -> SimulationEngine {
    let mut engine = empty_field();
    engine.set_vehicle_health(health);
    engine.spawn_test_enemy(Position::new(-200.0, 0.0, 0.0), 0.0, 10.0);
    engine
}

#[test]
fn test_health_exhaustion_is_defeat() {
    let mut engine = under_fire(3);

    let mut hits = 0;
    let mut snap = engine.snapshot();
    for _ in 0..200 {
        snap = engine.tick().unwrap();
        hits += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
            .count();
        if snap.phase != GamePhase::Playing {
            break;
        }
        assert!(snap.vehicle.health > 0);
    }

    assert_eq!(snap.phase, GamePhase::Defeat);
    assert_eq!(snap.vehicle.health, 0);
    assert_eq!(hits, 3);
    assert_eq!(game_over(&snap), Some((Outcome::Defeat, Some(DefeatCause::Destroyed))));
    assert!(snap.notification.unwrap().message().starts_with("Game over!"));
}

#[test]
fn test_terminal_state_is_frozen() {
    let mut engine = empty_field();
    engine.spawn_test_enemy(Position::new(5.0, 0.0, 0.0), 0.3, 1.0);
    run(&mut engine, 1);
    assert_eq!(engine.phase(), GamePhase::Defeat);

    let before = engine.snapshot();
    engine.queue_inputs([down(Key::W), down(Key::Space), InputEvent::PointerClick]);
    let snap = run(&mut engine, 10);

    assert_eq!(snap.phase, GamePhase::Defeat);
    assert_eq!(snap.time.tick, before.time.tick + 10);
    assert_eq!(snap.enemies, before.enemies);
    assert_eq!(snap.vehicle, before.vehicle);
    assert!(snap.projectiles.is_empty());
    assert!(snap.notification.is_none());
}

#[test]
fn test_restart_after_defeat() {
    let mut engine = under_fire(1);
    for _ in 0..200 {
        if engine.tick().unwrap().phase == GamePhase::Defeat {
            break;
        }
    }
    assert_eq!(engine.phase(), GamePhase::Defeat);
    assert!(!engine.snapshot().projectiles.is_empty());

    let snap = press(&mut engine, Key::R);
    assert_eq!(snap.phase, GamePhase::NotStarted);
    assert!(snap.events.contains(&GameEvent::GameReset));
    assert_eq!(snap.score.enemies_destroyed, 0);
    assert_eq!(snap.score.score, 0.0);
    assert_eq!(snap.enemies.len(), 10);
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.vehicle.health, 10);
    assert_eq!(snap.vehicle.position, Position::default());
    assert_eq!(engine.presentation().len(), 11);

    // A new round starts from the fresh wave.
    let snap = press(&mut engine, Key::Space);
    assert_eq!(snap.phase, GamePhase::Playing);
    assert!(snap.projectiles.is_empty());
}

#[test]
fn test_restart_after_victory() {
    let mut engine = empty_field();
    engine.score_mut().enemies_destroyed = 9;
    engine.spawn_test_enemy(Position::new(-100.0, 0.0, 0.0), 0.0, 1e9);

    let mut snap = press(&mut engine, Key::Space);
    for _ in 0..30 {
        if snap.phase != GamePhase::Playing {
            break;
        }
        snap = engine.tick().unwrap();
    }
    assert_eq!(snap.phase, GamePhase::Victory);

    let snap = press(&mut engine, Key::R);
    assert_eq!(snap.phase, GamePhase::NotStarted);
    assert!(snap.events.contains(&GameEvent::GameReset));
    assert_eq!(snap.score.enemies_destroyed, 0);
    assert_eq!(snap.score.score, 0.0);
    assert_eq!(snap.hud.enemies_remaining, 10);
    assert_eq!(snap.enemies.len(), 10);
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.vehicle.health, 10);
    assert_eq!(snap.vehicle.speed, 0.0);
    assert_eq!(engine.presentation().len(), 11);

    let snap = press(&mut engine, Key::Space);
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.enemies.len(), 10);
}

#[test]
fn test_restart_ignored_while_playing() {
    let mut engine = started();
    let snap = press(&mut engine, Key::R);
    assert_eq!(snap.phase, GamePhase::Playing);
    assert!(!snap.events.contains(&GameEvent::GameReset));

    engine.restart().unwrap();
    assert_eq!(engine.phase(), GamePhase::Playing);
}

#[test]
fn test_restart_ignored_before_start() {
    let mut engine = engine();
    engine.restart().unwrap();
    assert_eq!(engine.phase(), GamePhase::NotStarted);
    assert_eq!(engine.presentation().len(), 11);
}

// ---- Invariants ----

/// A pilot that never moves and fires every 20 ticks. Enemies always reach
/// it, so every round ends.
fn stationary_inputs(tick: u64) -> Vec<InputEvent> {
    if tick % 20 == 0 {
        vec![down(Key::Space), up(Key::Space)]
    } else {
        Vec::new()
    }
}

#[test]
fn test_invariants_over_long_run() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 7,
        ..Default::default()
    });

    // The slowest enemy (0.2 units per tick) spawns at most ~1513 units out,
    // so a round ends within ~7600 ticks of starting.
    let mut rounds = 0;
    for tick in 0..16_000u64 {
        match engine.phase() {
            GamePhase::NotStarted => engine.queue_input(InputEvent::PointerClick),
            GamePhase::Victory | GamePhase::Defeat => engine.queue_input(down(Key::R)),
            GamePhase::Playing => engine.queue_inputs(stationary_inputs(tick)),
        }
        let snap = engine.tick().unwrap();
        if snap.notification.is_some() {
            rounds += 1;
        }

        let score = snap.score;
        assert!(score.enemies_destroyed <= score.total_enemies);
        assert!(snap.vehicle.health <= 10);
        assert!(snap.vehicle.speed >= 0.0 && snap.vehicle.speed <= 5.0);
        assert_eq!(snap.hud.enemies_remaining + score.enemies_destroyed, score.total_enemies);
        assert_eq!(snap.enemies.len() as u32, snap.hud.enemies_remaining);
        if snap.phase.is_terminal() {
            assert_eq!(snap.vehicle.speed, 0.0);
        }
        if snap.notification.is_some() {
            assert!(snap.phase.is_terminal());
            assert!(game_over(&snap).is_some());
        }
    }
    assert!(rounds >= 2, "only {rounds} rounds finished");
}
