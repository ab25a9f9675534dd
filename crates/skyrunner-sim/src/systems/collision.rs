//! Collision detection: projectile hits and vehicle contact.
//!
//! Bounding boxes come from the presentation layer. Candidates are scanned
//! newest first (descending spawn/fire sequence) and the first match wins;
//! there is no nearest-hit resolution.

use hecs::{Entity, World};
use tracing::debug;

use skyrunner_core::components::{Projectile, Pursuer, Renderable, Spent, Vehicle};
use skyrunner_core::enums::Owner;
use skyrunner_core::events::GameEvent;
use skyrunner_core::types::{Aabb, Position};

use crate::error::SimError;
use crate::presentation::Presentation;
use crate::score::ScoreState;
use crate::world_setup::despawn_with_renderable;

/// What the collision pass found this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_destroyed: u32,
    pub player_hits: u32,
    /// Spawn sequence of the first enemy found touching the vehicle.
    pub rammed_by: Option<u64>,
}

struct EnemyBox {
    entity: Entity,
    seq: u64,
    bounds: Aabb,
    alive: bool,
}

/// Run all three collision checks in order: player shots vs enemies, enemy
/// shots vs the player, then the player's box vs every surviving enemy.
///
/// Hit projectiles are tagged [`Spent`] for the projectile manager to prune.
/// Destroyed enemies are despawned immediately.
pub fn run<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    player: Entity,
    score: &mut ScoreState,
    score_per_kill: f64,
    events: &mut Vec<GameEvent>,
) -> Result<CollisionReport, SimError> {
    let mut report = CollisionReport::default();

    let player_handle = world.get::<&Renderable>(player)?.handle;
    let player_box = presentation
        .bounding_volume(player_handle)
        .ok_or(SimError::MissingRenderable(player_handle))?;

    let mut enemies = enemy_boxes(world, presentation)?;
    let player_shots = live_projectiles(world, Owner::Player);
    let enemy_shots = live_projectiles(world, Owner::Enemy);

    // --- Player projectiles vs enemies ---
    for &(shot, shot_id, shot_pos) in &player_shots {
        let Some(target) = enemies
            .iter_mut()
            .find(|e| e.alive && e.bounds.contains_point(shot_pos))
        else {
            continue;
        };
        target.alive = false;

        world.insert_one(shot, Spent)?;
        despawn_with_renderable(world, presentation, target.entity)?;

        score.record_kill(score_per_kill);
        report.enemies_destroyed += 1;
        debug!(enemy_id = target.seq, projectile_id = shot_id, destroyed = score.enemies_destroyed, "enemy destroyed");
        events.push(GameEvent::EnemyDestroyed {
            enemy_id: target.seq,
            projectile_id: shot_id,
        });
    }

    // --- Enemy projectiles vs player ---
    for &(shot, shot_id, shot_pos) in &enemy_shots {
        if !player_box.contains_point(shot_pos) {
            continue;
        }
        world.insert_one(shot, Spent)?;

        let mut vehicle = world.get::<&mut Vehicle>(player)?;
        vehicle.health = vehicle.health.saturating_sub(1);
        report.player_hits += 1;
        debug!(projectile_id = shot_id, health = vehicle.health, "player hit");
        events.push(GameEvent::PlayerHit {
            projectile_id: shot_id,
            health: vehicle.health,
        });
    }

    // --- Vehicle vs enemies ---
    report.rammed_by = enemies
        .iter()
        .find(|e| e.alive && e.bounds.intersects(&player_box))
        .map(|e| e.seq);

    Ok(report)
}

/// Boxes of every enemy, newest first.
fn enemy_boxes<P: Presentation>(world: &World, presentation: &P) -> Result<Vec<EnemyBox>, SimError> {
    let mut boxes = Vec::new();
    for (entity, (pursuer, renderable)) in world.query::<(&Pursuer, &Renderable)>().iter() {
        let bounds = presentation
            .bounding_volume(renderable.handle)
            .ok_or(SimError::MissingRenderable(renderable.handle))?;
        boxes.push(EnemyBox {
            entity,
            seq: pursuer.spawn_seq,
            bounds,
            alive: true,
        });
    }
    boxes.sort_by(|a, b| b.seq.cmp(&a.seq));
    Ok(boxes)
}

/// Unspent projectiles of one owner, newest first.
fn live_projectiles(world: &World, owner: Owner) -> Vec<(Entity, u64, Position)> {
    let mut shots: Vec<(Entity, u64, Position)> = world
        .query::<(&Position, &Projectile, Option<&Spent>)>()
        .iter()
        .filter(|(_entity, (_pos, projectile, spent))| spent.is_none() && projectile.owner == owner)
        .map(|(entity, (pos, projectile, _spent))| (entity, projectile.seq, *pos))
        .collect();
    shots.sort_by(|a, b| b.1.cmp(&a.1));
    shots
}
