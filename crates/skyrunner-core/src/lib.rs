//! Core types and definitions for the SKYRUNNER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, input events, state snapshots, game events, constants and
//! tuning. It has no dependency on any renderer or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod tuning;
pub mod types;
