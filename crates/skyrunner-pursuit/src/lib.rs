//! Pursuit AI for SKYRUNNER.
//!
//! Steering toward the player and timed fire decisions for enemy vehicles.

pub mod steering;

pub use skyrunner_core as core;
