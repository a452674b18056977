//! Systems that advance the simulation each tick.
//!
//! Systems are plain functions over the node arena and the unit world.
//! They do not own state; the engine passes in everything they touch.

pub mod arrival;
pub mod dispatch;
pub mod production;
pub mod snapshot;
pub mod transit;
