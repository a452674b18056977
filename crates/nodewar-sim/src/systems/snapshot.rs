//! Snapshot system: reads the arena and the unit world and builds a GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use nodewar_core::components::Unit;
use nodewar_core::enums::{Faction, GamePhase};
use nodewar_core::events::SimEvent;
use nodewar_core::state::*;
use nodewar_core::types::{NodeId, Position, SimTime};

use crate::arena::{Bases, NodeArena};
use crate::graph::Reachability;

/// Engine state that is not stored in the arena or the world.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub time: SimTime,
    pub phase: GamePhase,
    pub winner: Option<Faction>,
    pub selected: Option<NodeId>,
}

/// Build a complete GameStateSnapshot from the current state.
pub fn build_snapshot(
    world: &World,
    arena: &NodeArena,
    bases: &Bases,
    frame: FrameInfo,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: frame.time,
        phase: frame.phase,
        winner: frame.winner,
        selected: frame.selected,
        nodes: build_nodes(arena, bases),
        units: build_units(world, arena),
        events,
    }
}

/// Build NodeView list in handle order.
fn build_nodes(arena: &NodeArena, bases: &Bases) -> Vec<NodeView> {
    let reach = Reachability::compute(arena, bases);
    arena
        .iter()
        .map(|node| NodeView {
            id: node.id,
            position: node.position,
            layer: node.layer,
            owner: node.owner,
            unit_count: node.unit_count,
            capacity: node.capacity,
            connections: node.connections.clone(),
            is_base: bases.is_base(node.id),
            reachable: reach.is_linked(node),
        })
        .collect()
}

/// Build UnitView list from all units in transit, oldest first.
fn build_units(world: &World, arena: &NodeArena) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<&Unit>()
        .iter()
        .map(|(_, unit)| UnitView {
            id: unit.id,
            origin: unit.origin,
            destination: unit.destination,
            owner: unit.owner,
            progress: unit.progress,
            position: unit_position(arena, unit),
        })
        .collect();

    units.sort_by_key(|u| u.id);
    units
}

/// Point along the road at the unit's progress. Unknown endpoints collapse
/// onto whichever endpoint is known.
pub fn unit_position(arena: &NodeArena, unit: &Unit) -> Position {
    let from = arena.get(unit.origin).map(|n| n.position);
    let to = arena.get(unit.destination).map(|n| n.position);
    match (from, to) {
        (Some(a), Some(b)) => a.lerp(b, unit.progress),
        (Some(p), None) | (None, Some(p)) => p,
        (None, None) => Position::ZERO,
    }
}
