//! Game state snapshot: the complete visible state handed to presentation each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{Faction, GamePhase};
use crate::events::SimEvent;
use crate::types::{NodeId, Position, SimTime};

/// Complete game state after a tick has settled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Set once the phase is `Ended`.
    pub winner: Option<Faction>,
    pub selected: Option<NodeId>,
    pub nodes: Vec<NodeView>,
    pub units: Vec<UnitView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// A node as seen by presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub position: Position,
    pub layer: u32,
    pub owner: Faction,
    pub unit_count: u32,
    pub capacity: u32,
    pub connections: Vec<NodeId>,
    pub is_base: bool,
    /// Whether the node is linked to its owner's base.
    pub reachable: bool,
}

/// A unit in transit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: u64,
    pub origin: NodeId,
    pub destination: NodeId,
    pub owner: Faction,
    pub progress: f64,
    /// Interpolated between origin and destination at `progress`.
    pub position: Position,
}

impl GameStateSnapshot {
    /// Look up a node view by handle.
    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
