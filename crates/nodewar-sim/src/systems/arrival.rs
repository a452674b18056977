//! Arrival system: resolves units that finished their trip.

use hecs::{Entity, World};
use tracing::{debug, info};

use nodewar_core::components::Unit;
use nodewar_core::enums::Faction;
use nodewar_core::events::SimEvent;

use crate::arena::{Bases, NodeArena};

/// What a single arrival did to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalOutcome {
    /// Joined a friendly garrison (or was discarded because it was full).
    Reinforced,
    /// Killed one defender.
    Attacked,
    /// Took the node. `base_of` names the faction whose base it was, if any.
    Captured { base_of: Option<Faction> },
    /// The destination handle named no node.
    Lost,
}

/// Apply one arrived unit to its destination.
pub fn resolve_arrival(
    arena: &mut NodeArena,
    bases: &Bases,
    unit: &Unit,
    events: &mut Vec<SimEvent>,
) -> ArrivalOutcome {
    let Some(node) = arena.get_mut(unit.destination) else {
        return ArrivalOutcome::Lost;
    };

    if node.owner == unit.owner {
        if !node.is_full() {
            node.unit_count += 1;
        }
        events.push(SimEvent::NodeReinforced {
            node: node.id,
            unit_count: node.unit_count,
        });
        return ArrivalOutcome::Reinforced;
    }

    // One defender dies; a garrison of one or less falls.
    if node.unit_count > 1 {
        node.unit_count -= 1;
        return ArrivalOutcome::Attacked;
    }

    let previous_owner = node.owner;
    node.owner = unit.owner;
    node.unit_count = 1;
    node.round_robin = 0;

    info!(node = node.id.0, ?previous_owner, new_owner = ?unit.owner, "node captured");
    events.push(SimEvent::NodeCaptured {
        node: node.id,
        previous_owner,
        new_owner: unit.owner,
    });

    ArrivalOutcome::Captured {
        base_of: bases.faction_of(node.id),
    }
}

/// Resolve every arrived unit in creation order and despawn it.
///
/// Stops at the first base capture and returns the capturing faction; units
/// that arrived later in the same tick stay in the world unresolved.
pub fn run(
    world: &mut World,
    arena: &mut NodeArena,
    bases: &Bases,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) -> Option<Faction> {
    let mut arrived: Vec<(Entity, Unit)> = world
        .query::<&Unit>()
        .iter()
        .filter(|(_, unit)| unit.has_arrived())
        .map(|(entity, unit)| (entity, *unit))
        .collect();
    arrived.sort_by_key(|(_, unit)| unit.id);

    despawn_buffer.clear();
    let mut winner = None;
    for (entity, unit) in &arrived {
        despawn_buffer.push(*entity);
        let outcome = resolve_arrival(arena, bases, unit, events);
        if outcome == ArrivalOutcome::Lost {
            debug!(
                unit = unit.id,
                destination = unit.destination.0,
                "unit lost: no such node"
            );
        }
        if let ArrivalOutcome::Captured { base_of: Some(_) } = outcome {
            winner = Some(unit.owner);
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    winner
}
