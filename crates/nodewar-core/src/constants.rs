//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind `SimConfig`; the engine reads the config,
//! never these directly.

/// Runner tick rate (Hz).
pub const TICK_RATE: u32 = 30;

// --- Nodes ---

/// Seconds of eligible time a node needs to produce one unit.
pub const PRODUCTION_INTERVAL: f64 = 0.5;

/// Seconds of accumulated time a node needs before it may send one unit.
pub const SEND_INTERVAL: f64 = 1.0;

/// Maximum garrison of a node.
pub const NODE_CAPACITY: u32 = 50;

/// Hit-test radius of a node disc, in layout units.
pub const NODE_RADIUS: f64 = 20.0;

// --- Units ---

/// Transit progress gained per second. A full trip takes `1 / UNIT_SPEED` seconds.
pub const UNIT_SPEED: f64 = 0.5;

// --- Reinforcement ---

/// A same-layer neighbor is a reinforcement candidate only if it holds at
/// least this many fewer units than the sender.
pub const REINFORCE_MARGIN: u32 = 2;

// --- Layout ---

/// Number of tiers in each faction's tree (tier 0 is the base).
pub const LAYERS: u32 = 3;

/// X coordinate of the player base.
pub const PLAYER_BASE_X: f64 = 150.0;

/// X coordinate of the enemy base.
pub const ENEMY_BASE_X: f64 = 800.0;

/// Y coordinate of the first node in every tier.
pub const LAYOUT_TOP_Y: f64 = 200.0;

/// Horizontal distance between tiers.
pub const LAYER_GAP_X: f64 = 120.0;

/// Vertical distance between nodes within a tier.
pub const NODE_GAP_Y: f64 = 100.0;
