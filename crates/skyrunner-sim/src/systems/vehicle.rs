//! Player vehicle system: momentum, strafing and throttle from held keys.

use glam::DVec3;
use hecs::{Entity, World};

use skyrunner_core::components::{Renderable, Vehicle};
use skyrunner_core::enums::Owner;
use skyrunner_core::tuning::Tuning;
use skyrunner_core::types::Position;

use crate::error::SimError;
use crate::input::InputSnapshot;
use crate::presentation::Presentation;
use crate::systems::projectiles::{Fired, ProjectileManager};

/// Advance the vehicle one tick.
///
/// The vehicle first coasts forward (-x) at its current speed, then strafes
/// on y/z for each held arrow key, then W/S adjust speed for the next tick.
pub fn run<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    player: Entity,
    input: &InputSnapshot,
    tuning: &Tuning,
) -> Result<(), SimError> {
    let (pos, vehicle, renderable) =
        world.query_one_mut::<(&mut Position, &mut Vehicle, &Renderable)>(player)?;

    pos.x -= vehicle.speed;

    let step = tuning.strafe_step;
    if input.up {
        pos.y += step;
    }
    if input.down {
        pos.y -= step;
    }
    if input.left {
        pos.z += step;
    }
    if input.right {
        pos.z -= step;
    }

    if input.accelerate && vehicle.speed < tuning.max_speed {
        vehicle.speed = (vehicle.speed + tuning.speed_step()).min(tuning.max_speed);
    }
    if input.decelerate && vehicle.speed > 0.0 {
        vehicle.speed = (vehicle.speed - tuning.speed_step()).max(0.0);
    }

    presentation.set_position(renderable.handle, *pos);
    Ok(())
}

/// Fire a player projectile straight ahead from the vehicle's muzzle.
/// `None` when the fire cooldown has not elapsed.
pub fn fire<P: Presentation>(
    world: &mut World,
    presentation: &mut P,
    projectiles: &mut ProjectileManager,
    player: Entity,
    tuning: &Tuning,
    now_ms: f64,
) -> Result<Option<Fired>, SimError> {
    let pos = *world.get::<&Position>(player)?;
    let origin = Position::new(pos.x - tuning.muzzle_offset, pos.y, pos.z);
    Ok(projectiles.fire(
        world,
        presentation,
        origin,
        DVec3::NEG_X,
        tuning.player_projectile_speed,
        Owner::Player,
        now_ms,
    ))
}
