//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, Owner};
use crate::events::{GameEvent, Notification};
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub hud: HudView,
    pub score: ScoreView,
    pub vehicle: VehicleView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub camera: CameraView,
    pub events: Vec<GameEvent>,
    /// Set only on the tick the round ends.
    pub notification: Option<Notification>,
}

/// Values shown on the heads-up display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    /// Displayed speed (`speed * 20`, rounded).
    pub speed: i64,
    /// Rounded vehicle height.
    pub altitude: i64,
    pub health: u32,
    pub enemies_remaining: u32,
    pub score: i64,
}

/// Raw scoring counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: f64,
    pub enemies_destroyed: u32,
    pub total_enemies: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleView {
    pub position: Position,
    pub speed: f64,
    pub health: u32,
    pub heading: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: u64,
    pub position: Position,
    pub heading: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub projectile_id: u64,
    pub owner: Owner,
    pub position: Position,
}

/// Chase camera placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub eye: Position,
    pub target: Position,
}

impl CameraView {
    /// Camera sitting at `offset` from the followed position, looking at it.
    pub fn follow(target: Position, offset: [f64; 3]) -> Self {
        Self {
            eye: Position::new(target.x + offset[0], target.y + offset[1], target.z + offset[2]),
            target,
        }
    }
}

/// Matches JavaScript `Math.round` (half toward +∞).
pub fn hud_round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
