//! Simulation constants and tuning defaults.

use std::f64::consts::PI;

/// Simulation tick rate (Hz). Movement constants are per tick.
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const FRAME_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Slack for comparing millisecond timestamps built from `FRAME_MS`, which
/// is not exact in binary.
pub const TIME_EPSILON_MS: f64 = 1e-6;

// --- Round ---

/// Enemies spawned per round; destroying all of them wins.
pub const TOTAL_ENEMIES: u32 = 10;

/// Player health at the start of a round.
pub const PLAYER_START_HEALTH: u32 = 10;

// --- Vehicle ---

pub const MAX_SPEED: f64 = 5.0;

pub const ACCELERATION: f64 = 0.05;

/// Fraction of `ACCELERATION` applied per tick while W/S is held.
pub const ACCELERATION_RATE: f64 = 0.5;

/// Units per tick moved on y/z while an arrow key is held.
pub const STRAFE_STEP: f64 = 1.0;

/// Yaw of the vehicle and of freshly spawned enemies.
pub const INITIAL_HEADING: f64 = PI;

// --- Projectiles ---

/// Minimum gap between accepted player shots.
pub const PLAYER_FIRE_COOLDOWN_MS: f64 = 300.0;

pub const PLAYER_PROJECTILE_SPEED: f64 = 10.0;

pub const ENEMY_PROJECTILE_SPEED: f64 = 5.0;

/// Distance along x between a shooter's centre and its muzzle.
pub const MUZZLE_OFFSET: f64 = 15.0;

/// Projectiles farther than this from the player are pruned.
pub const PROJECTILE_RANGE: f64 = 1000.0;

// --- Enemies ---

pub const ENEMY_SPEED_MIN: f64 = 0.2;
pub const ENEMY_SPEED_MAX: f64 = 0.5;

pub const ENEMY_SHOOT_INTERVAL_MIN_MS: f64 = 2000.0;
pub const ENEMY_SHOOT_INTERVAL_MAX_MS: f64 = 6000.0;

/// Enemies spawn ahead of the player in x ∈ [MIN, MAX).
pub const ENEMY_SPAWN_X_MIN: f64 = -1500.0;
pub const ENEMY_SPAWN_X_MAX: f64 = -500.0;

/// Lateral spread of the spawn area, z ∈ [MIN, MAX).
pub const ENEMY_SPAWN_Z_MIN: f64 = -200.0;
pub const ENEMY_SPAWN_Z_MAX: f64 = 200.0;

// --- Scoring ---

pub const SCORE_PER_KILL: f64 = 100.0;

/// Score gained per tick per unit of speed.
pub const SCORE_SPEED_FACTOR: f64 = 0.1;

/// HUD speed readout multiplier.
pub const HUD_SPEED_FACTOR: f64 = 20.0;

// --- Camera ---

/// Chase camera offset from the vehicle.
pub const CAMERA_OFFSET: [f64; 3] = [30.0, 30.0, 80.0];
