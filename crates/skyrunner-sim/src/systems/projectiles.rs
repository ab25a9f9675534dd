//! Projectile manager: fire, advance and prune projectiles.
//!
//! Projectiles move a fixed velocity per tick. They leave the world when
//! they register a hit (marked [`Spent`] by the collision system) or when
//! they stray farther than the configured range from the player.

use glam::DVec3;
use hecs::{Entity, World};
use tracing::debug;

use skyrunner_core::components::{Projectile, Renderable, Spent};
use skyrunner_core::constants::TIME_EPSILON_MS;
use skyrunner_core::enums::{Owner, RenderKind};
use skyrunner_core::types::{Position, Velocity};

use crate::presentation::Presentation;

/// A projectile accepted by [`ProjectileManager::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub entity: Entity,
    pub projectile_id: u64,
}

#[derive(Debug, Clone)]
pub struct ProjectileManager {
    /// Minimum gap between accepted player shots.
    cooldown_ms: f64,
    player_last_shot_ms: Option<f64>,
    next_seq: u64,
}

impl ProjectileManager {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            player_last_shot_ms: None,
            next_seq: 0,
        }
    }

    /// Spawn a projectile at `origin` moving `direction * speed` per tick.
    ///
    /// Player shots closer than the cooldown to the previous accepted shot
    /// are rejected with `None`. Enemy shots are never limited.
    pub fn fire<P: Presentation>(
        &mut self,
        world: &mut World,
        presentation: &mut P,
        origin: Position,
        direction: DVec3,
        speed: f64,
        owner: Owner,
        now_ms: f64,
    ) -> Option<Fired> {
        if owner == Owner::Player {
            if let Some(last) = self.player_last_shot_ms {
                if now_ms - last < self.cooldown_ms - TIME_EPSILON_MS {
                    debug!(now_ms, last, "player shot rejected by cooldown");
                    return None;
                }
            }
            self.player_last_shot_ms = Some(now_ms);
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let handle = presentation.spawn_renderable(RenderKind::projectile(owner), origin);
        let entity = world.spawn((
            origin,
            Velocity::along(direction, speed),
            Projectile { owner, seq },
            Renderable { handle },
        ));

        debug!(?owner, projectile_id = seq, x = origin.x, y = origin.y, z = origin.z, "projectile fired");
        Some(Fired {
            entity,
            projectile_id: seq,
        })
    }

    /// Move every live projectile by its velocity.
    pub fn advance<P: Presentation>(&self, world: &mut World, presentation: &mut P) {
        for (_entity, (pos, vel, renderable, _projectile)) in
            world.query_mut::<(&mut Position, &Velocity, &Renderable, &Projectile)>()
        {
            *pos = pos.advanced_by(vel);
            presentation.set_position(renderable.handle, *pos);
        }
    }

    /// Remove spent projectiles and those beyond `range` of `player`.
    /// Returns how many were removed.
    pub fn prune<P: Presentation>(
        &self,
        world: &mut World,
        presentation: &mut P,
        player: Position,
        range: f64,
    ) -> usize {
        let doomed: Vec<(Entity, Renderable)> = world
            .query_mut::<(&Position, &Renderable, &Projectile, Option<&Spent>)>()
            .into_iter()
            .filter(|(_entity, (pos, _renderable, _projectile, spent))| {
                spent.is_some() || pos.range_to(&player) > range
            })
            .map(|(entity, (_pos, renderable, _projectile, _spent))| (entity, *renderable))
            .collect();

        for &(entity, renderable) in &doomed {
            presentation.remove_renderable(renderable.handle);
            let _ = world.despawn(entity);
        }
        doomed.len()
    }

    /// Remove every projectile regardless of owner or state.
    pub fn clear<P: Presentation>(&self, world: &mut World, presentation: &mut P) -> usize {
        let doomed: Vec<(Entity, Renderable)> = world
            .query_mut::<(&Renderable, &Projectile)>()
            .into_iter()
            .map(|(entity, (renderable, _projectile))| (entity, *renderable))
            .collect();

        for &(entity, renderable) in &doomed {
            presentation.remove_renderable(renderable.handle);
            let _ = world.despawn(entity);
        }
        doomed.len()
    }

    /// Forget the player's last shot so the next one is always accepted.
    pub fn reset_cooldown(&mut self) {
        self.player_last_shot_ms = None;
    }
}

/// Number of live projectiles, optionally filtered by owner.
pub fn live_count(world: &World, owner: Option<Owner>) -> usize {
    world
        .query::<&Projectile>()
        .iter()
        .filter(|(_entity, p)| owner.map_or(true, |o| p.owner == o))
        .count()
}
