//! Events emitted by the simulation for presentation feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{DefeatCause, Outcome, Owner};

/// Things that happened during a tick, for sound and effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    GameStarted,
    /// The round was torn down and a fresh enemy wave spawned.
    GameReset,
    ShotFired { owner: Owner, projectile_id: u64 },
    EnemyDestroyed { enemy_id: u64, projectile_id: u64 },
    PlayerHit { projectile_id: u64, health: u32 },
    GameOver { outcome: Outcome, cause: Option<DefeatCause> },
}

/// Terminal message surfaced once when a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub outcome: Outcome,
    pub final_score: f64,
}

impl Notification {
    /// Text for a modal dialog.
    pub fn message(&self) -> String {
        let score = crate::state::hud_round(self.final_score);
        match self.outcome {
            Outcome::Victory => {
                format!("Victory! Your score: {score}\nPress R to play again")
            }
            Outcome::Defeat => format!("Game over! Your score: {score}\nPress R to play again"),
        }
    }
}
