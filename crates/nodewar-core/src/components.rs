//! Node and unit data.
//!
//! Both are plain data; game logic lives in the sim crate's systems.
//! Nodes are stored in the engine's node arena, units are hecs entities.

use serde::{Deserialize, Serialize};

use crate::enums::{DispatchIntent, Faction};
use crate::types::{NodeId, Position};

/// A production site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    /// Distance tier from the owning faction's base in the initial layout (0 = base).
    pub layer: u32,
    pub owner: Faction,
    /// Garrison size, always within `0..=capacity`.
    pub unit_count: u32,
    pub capacity: u32,
    /// Neighbor handles. Kept symmetric by the graph module.
    pub connections: Vec<NodeId>,
    /// Eligible seconds accumulated toward the next produced unit.
    pub production_timer: f64,
    /// Seconds accumulated toward the next send.
    pub dispatch_timer: f64,
    /// Pool used the next time both pools have candidates.
    pub next_intent: DispatchIntent,
    /// Shared rotation counter across both pools.
    pub round_robin: usize,
}

impl Node {
    pub fn new(id: NodeId, position: Position, layer: u32, owner: Faction, capacity: u32) -> Self {
        Self {
            id,
            position,
            layer,
            owner,
            unit_count: 0,
            capacity,
            connections: Vec::new(),
            production_timer: 0.0,
            dispatch_timer: 0.0,
            next_intent: DispatchIntent::default(),
            round_robin: 0,
        }
    }

    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.unit_count >= self.capacity
    }
}

/// A unit in transit between two nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    /// Creation serial; arrivals resolve in this order.
    pub id: u64,
    pub origin: NodeId,
    pub destination: NodeId,
    pub owner: Faction,
    /// Fraction of the trip completed, in `0.0..=1.0`.
    pub progress: f64,
}

impl Unit {
    pub fn has_arrived(&self) -> bool {
        self.progress >= 1.0
    }
}
