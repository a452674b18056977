//! Core types and definitions for the nodewar simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! node and unit components, commands, state snapshots, events, and constants.
//! It has no dependency on any runtime framework or engine logic.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
