//! Events emitted by the simulation for presentation and logging.

use serde::{Deserialize, Serialize};

use crate::enums::{ConnectRejection, DispatchIntent, Faction};
use crate::types::NodeId;

/// Something notable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The clock started.
    GameStarted,
    /// A road was built.
    ConnectionCreated { a: NodeId, b: NodeId },
    /// A road request was refused.
    ConnectionRejected {
        from: NodeId,
        to: NodeId,
        reason: ConnectRejection,
    },
    /// A node sent a unit.
    UnitDispatched {
        unit: u64,
        origin: NodeId,
        destination: NodeId,
        intent: DispatchIntent,
    },
    /// A unit joined a friendly garrison.
    NodeReinforced { node: NodeId, unit_count: u32 },
    /// A node changed hands.
    NodeCaptured {
        node: NodeId,
        previous_owner: Faction,
        new_owner: Faction,
    },
    /// A base fell.
    GameOver { winner: Faction },
}
