//! Input events sent from the host to the simulation.
//!
//! Events are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Keys the simulation distinguishes. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Accelerate.
    W,
    /// Decelerate.
    S,
    /// Fire.
    Space,
    /// Restart after a terminal outcome.
    R,
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` string. Letters are case-insensitive.
    pub fn from_key_str(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "w" | "W" => Key::W,
            "s" | "S" => Key::S,
            " " => Key::Space,
            "r" | "R" => Key::R,
            _ => Key::Other,
        }
    }
}

/// Discrete input produced by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Click anywhere on the page (or on the start button).
    PointerClick,
}
