//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player vehicle and enemy waves with their component bundles,
//! registering a renderable for each with the presentation layer.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyrunner_core::components::*;
use skyrunner_core::constants::{
    ENEMY_SPAWN_X_MAX, ENEMY_SPAWN_X_MIN, ENEMY_SPAWN_Z_MAX, ENEMY_SPAWN_Z_MIN, INITIAL_HEADING,
};
use skyrunner_core::enums::RenderKind;
use skyrunner_core::tuning::Tuning;
use skyrunner_core::types::Position;

use crate::error::SimError;
use crate::presentation::Presentation;

/// Spawn the player's vehicle at the origin, stationary and at full health.
pub fn spawn_vehicle<P: Presentation>(world: &mut World, presentation: &mut P, tuning: &Tuning) -> Entity {
    let position = Position::default();
    let handle = presentation.spawn_renderable(RenderKind::Vehicle, position);
    presentation.set_heading(handle, INITIAL_HEADING);

    world.spawn((
        Player,
        position,
        Vehicle {
            speed: 0.0,
            health: tuning.player_health,
            heading: INITIAL_HEADING,
        },
        Renderable { handle },
    ))
}

/// Put the vehicle back at the origin, stopped, with full health.
pub fn reset_vehicle<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    player: Entity,
    tuning: &Tuning,
) -> Result<(), SimError> {
    let (pos, vehicle, renderable) =
        world.query_one_mut::<(&mut Position, &mut Vehicle, &Renderable)>(player)?;
    *pos = Position::default();
    vehicle.speed = 0.0;
    vehicle.health = tuning.player_health;
    presentation.set_position(renderable.handle, *pos);
    Ok(())
}

/// Spawn `count` enemies scattered ahead of the player.
/// `next_seq` numbers them in spawn order.
pub fn spawn_enemy_wave<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    now_ms: f64,
    next_seq: &mut u64,
    count: u32,
) {
    for _ in 0..count {
        spawn_enemy(world, presentation, rng, tuning, now_ms, next_seq);
    }
}

/// Spawn a single enemy at a random spot in the spawn area with randomized
/// speed and shoot interval. Its shot timer starts at `now_ms`.
pub fn spawn_enemy<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    now_ms: f64,
    next_seq: &mut u64,
) -> Entity {
    let x = uniform(rng, ENEMY_SPAWN_X_MIN, ENEMY_SPAWN_X_MAX);
    let z = uniform(rng, ENEMY_SPAWN_Z_MIN, ENEMY_SPAWN_Z_MAX);
    let speed = uniform(rng, tuning.enemy_speed_min, tuning.enemy_speed_max);
    let shoot_interval_ms = uniform(
        rng,
        tuning.enemy_shoot_interval_min_ms,
        tuning.enemy_shoot_interval_max_ms,
    );

    let pursuer = Pursuer {
        speed,
        shoot_interval_ms,
        last_shot_ms: now_ms,
        heading: INITIAL_HEADING,
        spawn_seq: *next_seq,
    };
    *next_seq += 1;

    spawn_enemy_at(world, presentation, Position::new(x, 0.0, z), pursuer)
}

/// Spawn an enemy with explicit state.
pub fn spawn_enemy_at<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    position: Position,
    pursuer: Pursuer,
) -> Entity {
    let handle = presentation.spawn_renderable(RenderKind::Enemy, position);
    presentation.set_heading(handle, pursuer.heading);
    world.spawn((position, pursuer, Renderable { handle }))
}

/// Uniform sample from [lo, hi); collapses to `lo` for an empty range.
fn uniform(rng: &mut ChaCha8Rng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Remove every enemy from the world and the scene. Returns how many.
pub fn despawn_enemies<P: Presentation>(world: &mut World, presentation: &mut P) -> usize {
    let doomed: Vec<(Entity, Renderable)> = world
        .query_mut::<(&Pursuer, &Renderable)>()
        .into_iter()
        .map(|(entity, (_pursuer, renderable))| (entity, *renderable))
        .collect();

    for &(entity, renderable) in &doomed {
        presentation.remove_renderable(renderable.handle);
        let _ = world.despawn(entity);
    }
    doomed.len()
}

/// Despawn one entity and its renderable.
pub fn despawn_with_renderable<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    entity: Entity,
) -> Result<(), SimError> {
    let renderable = *world.get::<&Renderable>(entity)?;
    presentation.remove_renderable(renderable.handle);
    world.despawn(entity)?;
    Ok(())
}
