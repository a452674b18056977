//! Engine configuration.
//!
//! Every field has a default taken from `nodewar_core::constants`, so a JSON
//! file only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nodewar_core::constants::*;

/// Errors raised while loading or validating a `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
    #[error("layout needs at least one layer")]
    NoLayers,
}

/// Configuration for a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seconds per produced unit.
    pub production_interval: f64,
    /// Seconds between sends from one node.
    pub send_interval: f64,
    /// Transit progress per second.
    pub unit_speed: f64,
    pub node_capacity: u32,
    /// Minimum garrison gap for a reinforcement transfer.
    pub reinforce_margin: u32,
    /// Tiers per faction tree.
    pub layers: u32,
    pub player_base_x: f64,
    pub enemy_base_x: f64,
    pub layout_top_y: f64,
    pub layer_gap_x: f64,
    pub node_gap_y: f64,
    /// Let a linked node open a road into an enemy-owned node.
    pub allow_assault_links: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            production_interval: PRODUCTION_INTERVAL,
            send_interval: SEND_INTERVAL,
            unit_speed: UNIT_SPEED,
            node_capacity: NODE_CAPACITY,
            reinforce_margin: REINFORCE_MARGIN,
            layers: LAYERS,
            player_base_x: PLAYER_BASE_X,
            enemy_base_x: ENEMY_BASE_X,
            layout_top_y: LAYOUT_TOP_Y,
            layer_gap_x: LAYER_GAP_X,
            node_gap_y: NODE_GAP_Y,
            allow_assault_links: false,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the engine divides by or loops on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("production_interval", self.production_interval),
            ("send_interval", self.send_interval),
            ("unit_speed", self.unit_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.node_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.layers == 0 {
            return Err(ConfigError::NoLayers);
        }
        Ok(())
    }
}
