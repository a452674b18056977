//! Headless nodewar runner.
//!
//! Drives the simulation engine on a fixed-rate game loop thread, fed by a
//! command channel and an optional script of timed orders.

pub mod game_loop;
pub mod orders;
pub mod state;

pub use nodewar_core as core;
