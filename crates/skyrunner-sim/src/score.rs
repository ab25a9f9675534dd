//! Round scoring state tracked by the engine.

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: f64,
    pub enemies_destroyed: u32,
    pub total_enemies: u32,
}

impl ScoreState {
    pub fn new(total_enemies: u32) -> Self {
        Self {
            total_enemies,
            ..Default::default()
        }
    }

    pub fn reset(&mut self) {
        self.score = 0.0;
        self.enemies_destroyed = 0;
    }

    /// Count a kill. The counter never passes `total_enemies`.
    pub fn record_kill(&mut self, points: f64) {
        self.enemies_destroyed = (self.enemies_destroyed + 1).min(self.total_enemies);
        self.score += points;
    }

    pub fn all_destroyed(&self) -> bool {
        self.enemies_destroyed >= self.total_enemies
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.total_enemies - self.enemies_destroyed
    }
}
