//! Node storage.
//!
//! Nodes live here, NOT as ECS entities: they are created once by world
//! setup and never destroyed, so a `NodeId` is simply an index that stays
//! valid for the whole match.

use nodewar_core::components::Node;
use nodewar_core::enums::Faction;
use nodewar_core::types::{NodeId, Position};

/// Arena of all nodes, indexed by `NodeId`.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its handle.
    pub fn spawn(
        &mut self,
        position: Position,
        layer: u32,
        owner: Faction,
        capacity: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, position, layer, owner, capacity));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// All handles in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// First node whose disc of `radius` contains `point`.
    pub fn pick(&self, point: Position, radius: f64) -> Option<NodeId> {
        let radius_sq = radius * radius;
        self.nodes
            .iter()
            .find(|node| node.position.distance_squared(point) <= radius_sq)
            .map(|node| node.id)
    }
}

/// The base of each faction, fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bases {
    pub player: NodeId,
    pub enemy: NodeId,
}

impl Bases {
    pub fn of(&self, faction: Faction) -> NodeId {
        match faction {
            Faction::Player => self.player,
            Faction::Enemy => self.enemy,
        }
    }

    pub fn is_base(&self, id: NodeId) -> bool {
        id == self.player || id == self.enemy
    }

    /// The faction whose base `id` is, if any.
    pub fn faction_of(&self, id: NodeId) -> Option<Faction> {
        Faction::ALL.into_iter().find(|&f| self.of(f) == id)
    }
}
