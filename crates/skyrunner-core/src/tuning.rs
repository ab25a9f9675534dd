//! Gameplay tuning, loadable from JSON.
//!
//! Every field defaults to the matching value in [`crate::constants`], so a
//! tuning file only needs the fields it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Milliseconds the simulation clock advances per tick.
    pub frame_ms: f64,
    pub total_enemies: u32,
    pub player_health: u32,
    pub max_speed: f64,
    pub acceleration: f64,
    pub acceleration_rate: f64,
    pub strafe_step: f64,
    pub fire_cooldown_ms: f64,
    pub player_projectile_speed: f64,
    pub enemy_projectile_speed: f64,
    pub muzzle_offset: f64,
    pub projectile_range: f64,
    pub enemy_speed_min: f64,
    pub enemy_speed_max: f64,
    pub enemy_shoot_interval_min_ms: f64,
    pub enemy_shoot_interval_max_ms: f64,
    pub score_per_kill: f64,
    pub score_speed_factor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            total_enemies: TOTAL_ENEMIES,
            player_health: PLAYER_START_HEALTH,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            acceleration_rate: ACCELERATION_RATE,
            strafe_step: STRAFE_STEP,
            fire_cooldown_ms: PLAYER_FIRE_COOLDOWN_MS,
            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,
            muzzle_offset: MUZZLE_OFFSET,
            projectile_range: PROJECTILE_RANGE,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_shoot_interval_min_ms: ENEMY_SHOOT_INTERVAL_MIN_MS,
            enemy_shoot_interval_max_ms: ENEMY_SHOOT_INTERVAL_MAX_MS,
            score_per_kill: SCORE_PER_KILL,
            score_speed_factor: SCORE_SPEED_FACTOR,
        }
    }
}

impl Tuning {
    /// Per-tick speed change while W or S is held.
    pub fn speed_step(&self) -> f64 {
        self.acceleration * self.acceleration_rate
    }
}
