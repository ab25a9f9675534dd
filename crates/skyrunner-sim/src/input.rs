//! Input tracker: which keys are currently held.
//!
//! The tracker is only a key-state map. Deciding what a key press means in
//! each game phase is the engine's job.

use std::collections::HashSet;

use skyrunner_core::commands::Key;

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: HashSet<Key>,
}

/// Held state of the movement bindings, sampled once at the top of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub accelerate: bool,
    pub decelerate: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if key != Key::Other {
            self.held.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            up: self.is_held(Key::ArrowUp),
            down: self.is_held(Key::ArrowDown),
            left: self.is_held(Key::ArrowLeft),
            right: self.is_held(Key::ArrowRight),
            accelerate: self.is_held(Key::W),
            decelerate: self.is_held(Key::S),
        }
    }
}

impl InputSnapshot {
    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::ArrowUp => self.up,
            Key::ArrowDown => self.down,
            Key::ArrowLeft => self.left,
            Key::ArrowRight => self.right,
            Key::W => self.accelerate,
            Key::S => self.decelerate,
            Key::Space | Key::R | Key::Other => false,
        }
    }
}
