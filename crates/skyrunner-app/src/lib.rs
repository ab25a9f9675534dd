//! Headless runner for SKYRUNNER.
//!
//! Hosts the simulation engine on its own thread and drives it with
//! scripted input.

pub mod autopilot;
pub mod game_loop;
pub mod state;
