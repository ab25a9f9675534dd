//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::Owner;
use crate::types::RenderHandle;

/// Marks the player's vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Player vehicle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vehicle {
    /// Forward speed in units per tick, within [0, max_speed].
    pub speed: f64,
    pub health: u32,
    /// Yaw in radians (fixed; the vehicle never turns).
    pub heading: f64,
}

/// Pursuit state for an enemy vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pursuer {
    /// Units per tick toward the player.
    pub speed: f64,
    pub shoot_interval_ms: f64,
    pub last_shot_ms: f64,
    /// Yaw in radians facing the player.
    pub heading: f64,
    /// Spawn order within the current round; fixes collision scan order.
    pub spawn_seq: u64,
}

/// A live projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    /// Fire order; fixes collision scan order.
    pub seq: u64,
}

/// Marks a projectile that registered a hit this tick and awaits pruning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spent;

/// Links an entity to its presentation-layer object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Renderable {
    pub handle: RenderHandle,
}
