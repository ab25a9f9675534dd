//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus the presentation layer.
//! Per-entity state lives in components; the projectile manager keeps only
//! the player's fire cooldown and the projectile sequence counter.

pub mod collision;
pub mod projectiles;
pub mod pursuit;
pub mod snapshot;
pub mod vehicle;
