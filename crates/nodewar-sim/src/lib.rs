//! Simulation engine for nodewar.
//!
//! Owns the node arena and the hecs world of units in transit, runs the
//! per-tick systems, and produces `GameStateSnapshot`s for presentation.

pub mod arena;
pub mod config;
pub mod engine;
pub mod graph;
pub mod systems;
pub mod targeting;
pub mod world_setup;

pub use config::{ConfigError, SimConfig};
pub use engine::SimulationEngine;
pub use nodewar_core as core;
