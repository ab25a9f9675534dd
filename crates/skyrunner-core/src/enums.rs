//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game state. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first key press or click.
    #[default]
    NotStarted,
    Playing,
    /// Every enemy destroyed. Terminal until restart.
    Victory,
    /// Health exhausted or rammed by an enemy. Terminal until restart.
    Defeat,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// What the presentation layer should draw for a spawned renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderKind {
    Vehicle,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
}

impl RenderKind {
    pub fn projectile(owner: Owner) -> Self {
        match owner {
            Owner::Player => RenderKind::PlayerProjectile,
            Owner::Enemy => RenderKind::EnemyProjectile,
        }
    }
}

/// Terminal outcome of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Why a round was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    /// Health reached zero from enemy fire.
    Destroyed,
    /// The vehicle touched an enemy.
    Rammed,
}
