//! Player commands sent from an input layer to the simulation.
//!
//! Commands are queued and applied at the start of the next tick.

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Graph editing ---
    /// Select a node as the origin of the next connection.
    SelectNode { node: NodeId },
    /// Drop the current selection.
    ClearSelection,
    /// Build a road from `from` to `to` on behalf of `from`'s owner.
    /// Clears the selection whether or not the road is built.
    Connect { from: NodeId, to: NodeId },

    // --- Simulation control ---
    /// Start the clock.
    StartGame,
    /// Ask to leave once the match has ended.
    RequestQuit,
}
