//! Scripted player for headless runs.
//!
//! Reads each snapshot and answers with the input events a simple player
//! would produce: start the game, cruise forward, line up on the nearest
//! enemy and fire on a fixed cadence.

use std::collections::HashSet;

use skyrunner_core::commands::{InputEvent, Key};
use skyrunner_core::enums::GamePhase;
use skyrunner_core::state::{EnemyView, GameStateSnapshot};

/// Ticks between shots. Longer than the fire cooldown at 60 Hz.
const FIRE_EVERY_TICKS: u64 = 20;
/// Forward speed the autopilot holds W for.
const CRUISE_SPEED: f64 = 0.5;
/// Lateral slack before the autopilot strafes.
const LANE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Press R after a round ends instead of idling.
    keep_playing: bool,
    held: HashSet<Key>,
    last_shot_tick: Option<u64>,
}

impl Autopilot {
    pub fn new(keep_playing: bool) -> Self {
        Self {
            keep_playing,
            ..Default::default()
        }
    }

    /// Inputs to send before the next tick.
    pub fn next_inputs(&mut self, snapshot: &GameStateSnapshot) -> Vec<InputEvent> {
        let mut out = Vec::new();
        match snapshot.phase {
            GamePhase::NotStarted => {
                self.last_shot_tick = None;
                out.push(InputEvent::PointerClick);
            }
            GamePhase::Playing => self.fly(snapshot, &mut out),
            GamePhase::Victory | GamePhase::Defeat => {
                if self.keep_playing {
                    out.push(InputEvent::KeyDown { key: Key::R });
                    out.push(InputEvent::KeyUp { key: Key::R });
                }
            }
        }
        out
    }

    fn fly(&mut self, snapshot: &GameStateSnapshot, out: &mut Vec<InputEvent>) {
        let vehicle = &snapshot.vehicle;

        self.hold(Key::W, vehicle.speed < CRUISE_SPEED, out);

        let lane = nearest_enemy(snapshot).map(|e| e.position.z - vehicle.position.z);
        self.hold(Key::ArrowLeft, lane.is_some_and(|dz| dz > LANE_TOLERANCE), out);
        self.hold(Key::ArrowRight, lane.is_some_and(|dz| dz < -LANE_TOLERANCE), out);

        let tick = snapshot.time.tick;
        let due = self
            .last_shot_tick
            .map_or(true, |last| tick.saturating_sub(last) >= FIRE_EVERY_TICKS);
        if due && lane.is_some() {
            self.last_shot_tick = Some(tick);
            out.push(InputEvent::KeyDown { key: Key::Space });
            out.push(InputEvent::KeyUp { key: Key::Space });
        }
    }

    /// Emit a key-down or key-up when the wanted state differs from the
    /// state already sent.
    fn hold(&mut self, key: Key, want: bool, out: &mut Vec<InputEvent>) {
        if want && self.held.insert(key) {
            out.push(InputEvent::KeyDown { key });
        } else if !want && self.held.remove(&key) {
            out.push(InputEvent::KeyUp { key });
        }
    }
}

/// Closest enemy to the vehicle; ties keep the lowest id.
fn nearest_enemy(snapshot: &GameStateSnapshot) -> Option<&EnemyView> {
    let origin = snapshot.vehicle.position;
    snapshot.enemies.iter().min_by(|a, b| {
        origin
            .range_to(&a.position)
            .total_cmp(&origin.range_to(&b.position))
    })
}
