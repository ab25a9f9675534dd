//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes queued input, runs
//! all systems, and produces `GameStateSnapshot`s. Scene changes go through
//! a [`Presentation`] implementation, so the engine is fully headless and
//! deterministic under test.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use skyrunner_core::commands::{InputEvent, Key};
use skyrunner_core::components::Vehicle;
use skyrunner_core::enums::{DefeatCause, GamePhase, Outcome, Owner};
use skyrunner_core::events::{GameEvent, Notification};
use skyrunner_core::state::GameStateSnapshot;
use skyrunner_core::tuning::Tuning;
use skyrunner_core::types::{Position, SimTime};

use crate::error::SimError;
use crate::input::InputTracker;
use crate::presentation::{HeadlessPresentation, Presentation};
use crate::score::ScoreState;
use crate::systems;
use crate::systems::collision::CollisionReport;
use crate::systems::projectiles::ProjectileManager;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine<P: Presentation = HeadlessPresentation> {
    world: World,
    presentation: P,
    tuning: Tuning,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    input: InputTracker,
    input_queue: VecDeque<InputEvent>,
    projectiles: ProjectileManager,
    score: ScoreState,
    player: Entity,
    next_enemy_seq: u64,
    events: Vec<GameEvent>,
    notification: Option<Notification>,
}

impl SimulationEngine<HeadlessPresentation> {
    /// Create a new headless simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self::with_presentation(config, HeadlessPresentation::new())
    }
}

impl<P: Presentation> SimulationEngine<P> {
    /// Create an engine that drives `presentation`. The vehicle and the
    /// first enemy wave are spawned immediately; the game waits in
    /// `NotStarted` for the first input.
    pub fn with_presentation(config: SimConfig, mut presentation: P) -> Self {
        let SimConfig { seed, tuning } = config;
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let time = SimTime::default();

        let player = world_setup::spawn_vehicle(&mut world, &mut presentation, &tuning);
        let mut next_enemy_seq = 0;
        world_setup::spawn_enemy_wave(
            &mut world,
            &mut presentation,
            &mut rng,
            &tuning,
            time.elapsed_ms,
            &mut next_enemy_seq,
            tuning.total_enemies,
        );
        info!(seed, enemies = tuning.total_enemies, "simulation created");

        Self {
            world,
            presentation,
            time,
            phase: GamePhase::default(),
            rng,
            input: InputTracker::new(),
            input_queue: VecDeque::new(),
            projectiles: ProjectileManager::new(tuning.fire_cooldown_ms),
            score: ScoreState::new(tuning.total_enemies),
            player,
            next_enemy_seq,
            events: Vec::new(),
            notification: None,
            tuning,
        }
    }

    /// Queue an input event for processing at the next tick boundary.
    pub fn queue_input(&mut self, event: InputEvent) {
        self.input_queue.push_back(event);
    }

    /// Queue multiple input events.
    pub fn queue_inputs(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.input_queue.extend(events);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// The clock advances in every phase; the systems only run while
    /// `Playing`.
    pub fn tick(&mut self) -> Result<GameStateSnapshot, SimError> {
        self.process_inputs()?;

        if self.phase == GamePhase::Playing {
            self.run_systems()?;
        }
        self.time.advance(self.tuning.frame_ms);

        let events = std::mem::take(&mut self.events);
        let notification = self.notification.take();
        Ok(systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            &self.time,
            self.phase,
            &self.score,
            events,
            notification,
        ))
    }

    /// Snapshot of the current state without advancing. Carries no events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            &self.time,
            self.phase,
            &self.score,
            Vec::new(),
            None,
        )
    }

    /// `NotStarted` → `Playing`. Resets the vehicle and the round counters.
    /// A no-op in any other phase.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.phase != GamePhase::NotStarted {
            debug!(phase = ?self.phase, "start ignored");
            return Ok(());
        }
        world_setup::reset_vehicle(&mut self.world, &mut self.presentation, self.player, &self.tuning)?;
        self.score.reset();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStarted);
        info!(tick = self.time.tick, "game started");
        Ok(())
    }

    /// `Victory`/`Defeat` → `NotStarted`. Clears the field and spawns a
    /// fresh enemy wave. A no-op in any other phase.
    pub fn restart(&mut self) -> Result<(), SimError> {
        if !self.phase.is_terminal() {
            debug!(phase = ?self.phase, "restart ignored");
            return Ok(());
        }
        let enemies = world_setup::despawn_enemies(&mut self.world, &mut self.presentation);
        let projectiles = self.projectiles.clear(&mut self.world, &mut self.presentation);
        self.projectiles.reset_cooldown();
        world_setup::reset_vehicle(&mut self.world, &mut self.presentation, self.player, &self.tuning)?;
        self.score.reset();

        self.next_enemy_seq = 0;
        world_setup::spawn_enemy_wave(
            &mut self.world,
            &mut self.presentation,
            &mut self.rng,
            &self.tuning,
            self.time.elapsed_ms,
            &mut self.next_enemy_seq,
            self.tuning.total_enemies,
        );

        self.phase = GamePhase::NotStarted;
        self.notification = None;
        self.events.push(GameEvent::GameReset);
        info!(tick = self.time.tick, enemies, projectiles, "game reset");
        Ok(())
    }

    /// Fire a player shot now. Returns whether the shot was accepted; only
    /// possible while `Playing` and outside the fire cooldown.
    pub fn fire(&mut self) -> Result<bool, SimError> {
        if self.phase != GamePhase::Playing {
            debug!(phase = ?self.phase, "fire ignored");
            return Ok(false);
        }
        let fired = systems::vehicle::fire(
            &mut self.world,
            &mut self.presentation,
            &mut self.projectiles,
            self.player,
            &self.tuning,
            self.time.elapsed_ms,
        )?;
        match fired {
            Some(fired) => {
                self.events.push(GameEvent::ShotFired {
                    owner: Owner::Player,
                    projectile_id: fired.projectile_id,
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// The player's vehicle entity.
    pub fn player(&self) -> Entity {
        self.player
    }

    /// Mutable world access (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable score access (for tests).
    #[cfg(test)]
    pub fn score_mut(&mut self) -> &mut ScoreState {
        &mut self.score
    }

    /// Remove every enemy without scoring them (for tests).
    #[cfg(test)]
    pub fn clear_enemies(&mut self) {
        world_setup::despawn_enemies(&mut self.world, &mut self.presentation);
    }

    /// Place an enemy with explicit parameters (for tests). Its shot timer
    /// starts now. Returns its enemy id.
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, position: Position, speed: f64, shoot_interval_ms: f64) -> u64 {
        let seq = self.next_enemy_seq;
        self.next_enemy_seq += 1;
        let pursuer = skyrunner_core::components::Pursuer {
            speed,
            shoot_interval_ms,
            last_shot_ms: self.time.elapsed_ms,
            heading: skyrunner_core::constants::INITIAL_HEADING,
            spawn_seq: seq,
        };
        world_setup::spawn_enemy_at(&mut self.world, &mut self.presentation, position, pursuer);
        seq
    }

    /// Overwrite the vehicle's health (for tests).
    #[cfg(test)]
    pub fn set_vehicle_health(&mut self, health: u32) {
        if let Ok(mut vehicle) = self.world.get::<&mut Vehicle>(self.player) {
            vehicle.health = health;
        }
    }

    /// Process all queued input events.
    fn process_inputs(&mut self) -> Result<(), SimError> {
        while let Some(event) = self.input_queue.pop_front() {
            self.handle_input(event)?;
        }
        Ok(())
    }

    /// Handle a single input event according to the current phase.
    fn handle_input(&mut self, event: InputEvent) -> Result<(), SimError> {
        match event {
            InputEvent::KeyDown { key } => match self.phase {
                // The key that starts the game is not recorded as held.
                GamePhase::NotStarted => self.start()?,
                GamePhase::Playing => {
                    match key {
                        Key::Space => {
                            self.fire()?;
                        }
                        Key::R => self.restart()?,
                        _ => {}
                    }
                    self.input.key_down(key);
                }
                GamePhase::Victory | GamePhase::Defeat => {
                    if key == Key::R {
                        self.restart()?;
                    }
                }
            },
            InputEvent::KeyUp { key } => self.input.key_up(key),
            InputEvent::PointerClick => {
                if self.phase == GamePhase::NotStarted {
                    self.start()?;
                }
            }
        }
        Ok(())
    }

    fn player_position(&self) -> Result<Position, SimError> {
        self.world
            .get::<&Position>(self.player)
            .map(|pos| *pos)
            .map_err(|_| SimError::MissingVehicle)
    }

    /// Run all systems in order.
    fn run_systems(&mut self) -> Result<(), SimError> {
        let now_ms = self.time.elapsed_ms;
        let held = self.input.snapshot();

        // 1. Vehicle movement and throttle
        systems::vehicle::run(&mut self.world, &mut self.presentation, self.player, &held, &self.tuning)?;
        // 2. Projectile movement
        self.projectiles.advance(&mut self.world, &mut self.presentation);
        // 3. Pursuit and enemy fire
        let player_pos = self.player_position()?;
        systems::pursuit::run(
            &mut self.world,
            &mut self.presentation,
            &mut self.projectiles,
            &self.tuning,
            player_pos,
            now_ms,
            &mut self.events,
        );
        // 4. Collisions
        let report = systems::collision::run(
            &mut self.world,
            &mut self.presentation,
            self.player,
            &mut self.score,
            self.tuning.score_per_kill,
            &mut self.events,
        )?;
        // 5. Spent and out-of-range projectiles
        self.projectiles.prune(
            &mut self.world,
            &mut self.presentation,
            player_pos,
            self.tuning.projectile_range,
        );
        // 6. Win/loss
        self.check_outcome(&report)?;
        // 7. Distance score
        let vehicle = self.world.get::<&Vehicle>(self.player)?;
        self.score.score += vehicle.speed * self.tuning.score_speed_factor;
        Ok(())
    }

    /// Move to a terminal phase if this tick ended the round. Victory takes
    /// precedence over defeat by health, which takes precedence over contact.
    fn check_outcome(&mut self, report: &CollisionReport) -> Result<(), SimError> {
        let mut vehicle = self.world.get::<&mut Vehicle>(self.player)?;

        let (outcome, cause) = if self.score.all_destroyed() {
            (Outcome::Victory, None)
        } else if vehicle.health == 0 {
            (Outcome::Defeat, Some(DefeatCause::Destroyed))
        } else if report.rammed_by.is_some() {
            (Outcome::Defeat, Some(DefeatCause::Rammed))
        } else {
            return Ok(());
        };

        vehicle.speed = 0.0;
        self.phase = match outcome {
            Outcome::Victory => GamePhase::Victory,
            Outcome::Defeat => GamePhase::Defeat,
        };
        self.notification = Some(Notification {
            outcome,
            final_score: self.score.score,
        });
        self.events.push(GameEvent::GameOver { outcome, cause });
        info!(
            tick = self.time.tick,
            ?outcome,
            ?cause,
            score = self.score.score,
            destroyed = self.score.enemies_destroyed,
            health = vehicle.health,
            rammed_by = ?report.rammed_by,
            "round over"
        );
        Ok(())
    }
}
