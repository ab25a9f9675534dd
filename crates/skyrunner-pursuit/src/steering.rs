//! Pursuit steering.
//!
//! Pure functions that compute an enemy's next position, heading and fire
//! decision from its current state and the player's position.
//! No ECS dependency; operates on plain data.

use glam::DVec3;

use skyrunner_core::constants::TIME_EPSILON_MS;
use skyrunner_core::types::Position;

/// Input to the steering rule for a single enemy.
#[derive(Debug, Clone, Copy)]
pub struct PursuitContext {
    pub position: Position,
    /// The player's position this tick.
    pub target: Position,
    /// Units per tick.
    pub speed: f64,
    pub heading: f64,
    pub now_ms: f64,
    pub last_shot_ms: f64,
    pub shoot_interval_ms: f64,
    /// Forward (+x) distance from the enemy's centre to its muzzle.
    pub muzzle_offset: f64,
}

/// A shot the enemy wants to take this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub origin: Position,
    /// Unit vector from the enemy toward the player, fixed at fire time.
    pub direction: DVec3,
}

/// Output of the steering rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitUpdate {
    pub new_position: Position,
    pub new_heading: f64,
    /// Whether the shoot timer elapsed and must restart at `now_ms`.
    pub reset_shot_timer: bool,
    /// `None` when no shot is due, or when the aim direction is undefined.
    pub fire: Option<FireOrder>,
}

/// Unit vector from `from` toward `to`, or `None` when they coincide.
pub fn direction_to(from: &Position, to: &Position) -> Option<DVec3> {
    (to.to_dvec3() - from.to_dvec3()).try_normalize()
}

/// True once strictly more than `interval_ms` has passed since the last shot.
pub fn shot_due(now_ms: f64, last_shot_ms: f64, interval_ms: f64) -> bool {
    now_ms - last_shot_ms > interval_ms + TIME_EPSILON_MS
}

/// Evaluate one enemy for one tick: close in, face the player, maybe fire.
pub fn evaluate(ctx: &PursuitContext) -> PursuitUpdate {
    let new_position = match direction_to(&ctx.position, &ctx.target) {
        Some(dir) => Position::from(ctx.position.to_dvec3() + dir * ctx.speed),
        // Sitting on the player: nowhere to steer.
        None => ctx.position,
    };

    let new_heading = new_position.yaw_to(&ctx.target).unwrap_or(ctx.heading);

    let reset_shot_timer = shot_due(ctx.now_ms, ctx.last_shot_ms, ctx.shoot_interval_ms);
    let fire = if reset_shot_timer {
        direction_to(&new_position, &ctx.target).map(|direction| FireOrder {
            origin: Position::new(new_position.x + ctx.muzzle_offset, new_position.y, new_position.z),
            direction,
        })
    } else {
        None
    };

    PursuitUpdate {
        new_position,
        new_heading,
        reset_shot_timer,
        fire,
    }
}
