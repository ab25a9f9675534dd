//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use skyrunner_core::components::*;
use skyrunner_core::constants::{CAMERA_OFFSET, HUD_SPEED_FACTOR};
use skyrunner_core::enums::GamePhase;
use skyrunner_core::events::{GameEvent, Notification};
use skyrunner_core::state::*;
use skyrunner_core::types::{Position, SimTime};

use crate::score::ScoreState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    player: Entity,
    time: &SimTime,
    phase: GamePhase,
    score: &ScoreState,
    events: Vec<GameEvent>,
    notification: Option<Notification>,
) -> GameStateSnapshot {
    let vehicle = build_vehicle(world, player);

    GameStateSnapshot {
        time: *time,
        phase,
        hud: HudView {
            speed: hud_round(vehicle.speed * HUD_SPEED_FACTOR),
            altitude: hud_round(vehicle.position.y),
            health: vehicle.health,
            enemies_remaining: score.enemies_remaining(),
            score: hud_round(score.score),
        },
        score: ScoreView {
            score: score.score,
            enemies_destroyed: score.enemies_destroyed,
            total_enemies: score.total_enemies,
        },
        vehicle,
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        camera: CameraView::follow(vehicle.position, CAMERA_OFFSET),
        events,
        notification,
    }
}

fn build_vehicle(world: &World, player: Entity) -> VehicleView {
    let Ok(mut query) = world.query_one::<(&Position, &Vehicle)>(player) else {
        return VehicleView::default();
    };
    let view = query
        .get()
        .map(|(pos, vehicle)| VehicleView {
            position: *pos,
            speed: vehicle.speed,
            health: vehicle.health,
            heading: vehicle.heading,
        })
        .unwrap_or_default();
    view
}

/// Enemies ordered by spawn sequence.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Position, &Pursuer)>()
        .iter()
        .map(|(_, (pos, pursuer))| EnemyView {
            enemy_id: pursuer.spawn_seq,
            position: *pos,
            heading: pursuer.heading,
        })
        .collect();
    enemies.sort_by_key(|e| e.enemy_id);
    enemies
}

/// Live projectiles ordered by fire sequence. Spent ones are already gone
/// from the scene by the time a snapshot is taken.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(_, (pos, projectile))| ProjectileView {
            projectile_id: projectile.seq,
            owner: projectile.owner,
            position: *pos,
        })
        .collect();
    projectiles.sort_by_key(|p| p.projectile_id);
    projectiles
}
