//! Simulation engine for SKYRUNNER.
//!
//! Owns the hecs ECS world, runs systems once per frame,
//! and produces GameStateSnapshots for the presentation layer.

pub mod engine;
pub mod error;
pub mod input;
pub mod presentation;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use skyrunner_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;

#[cfg(test)]
mod tests;
