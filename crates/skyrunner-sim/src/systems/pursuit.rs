//! Pursuit system: steers every enemy toward the player and fires on timer.
//!
//! Calls the steering rule from skyrunner-pursuit for each enemy, then
//! applies the results to ECS components and the presentation layer.

use hecs::World;

use skyrunner_core::components::{Pursuer, Renderable};
use skyrunner_core::enums::Owner;
use skyrunner_core::events::GameEvent;
use skyrunner_core::tuning::Tuning;
use skyrunner_core::types::Position;

use skyrunner_pursuit::steering::{evaluate, FireOrder, PursuitContext};

use crate::presentation::Presentation;
use crate::systems::projectiles::ProjectileManager;

/// Run pursuit for all enemies. Shots are fired in spawn order.
pub fn run<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    projectiles: &mut ProjectileManager,
    tuning: &Tuning,
    player: Position,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    // Fire after the query: spawning needs the world.
    let mut orders: Vec<(u64, FireOrder)> = Vec::new();

    for (_entity, (pos, pursuer, renderable)) in
        world.query_mut::<(&mut Position, &mut Pursuer, &Renderable)>()
    {
        let ctx = PursuitContext {
            position: *pos,
            target: player,
            speed: pursuer.speed,
            heading: pursuer.heading,
            now_ms,
            last_shot_ms: pursuer.last_shot_ms,
            shoot_interval_ms: pursuer.shoot_interval_ms,
            muzzle_offset: tuning.muzzle_offset,
        };

        let update = evaluate(&ctx);
        *pos = update.new_position;
        pursuer.heading = update.new_heading;
        if update.reset_shot_timer {
            pursuer.last_shot_ms = now_ms;
        }
        presentation.set_position(renderable.handle, *pos);
        presentation.set_heading(renderable.handle, pursuer.heading);

        if let Some(order) = update.fire {
            orders.push((pursuer.spawn_seq, order));
        }
    }

    orders.sort_by_key(|(seq, _)| *seq);
    for (_seq, order) in orders {
        let fired = projectiles.fire(
            world,
            presentation,
            order.origin,
            order.direction,
            tuning.enemy_projectile_speed,
            Owner::Enemy,
            now_ms,
        );
        if let Some(fired) = fired {
            events.push(GameEvent::ShotFired {
                owner: Owner::Enemy,
                projectile_id: fired.projectile_id,
            });
        }
    }
}
