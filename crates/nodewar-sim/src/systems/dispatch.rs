//! Dispatch system: rate-limited sending of units from linked nodes.

use hecs::World;
use tracing::debug;

use nodewar_core::components::Unit;
use nodewar_core::events::SimEvent;

use crate::arena::NodeArena;
use crate::config::SimConfig;
use crate::graph::Reachability;
use crate::targeting;

/// Run the send timers of every node and spawn the resulting units.
///
/// A node accumulates time only while it is linked to its base and holds at
/// least one unit; otherwise its timer is reset so it does not fire a burst
/// once reconnected. At most one unit leaves a node per tick. A due send
/// with no valid target still consumes the interval.
pub fn run(
    world: &mut World,
    arena: &mut NodeArena,
    reach: &Reachability,
    dt: f64,
    config: &SimConfig,
    next_unit_id: &mut u64,
    events: &mut Vec<SimEvent>,
) {
    let ids: Vec<_> = arena.ids().collect();
    for id in ids {
        let Some(node) = arena.get_mut(id) else {
            continue;
        };
        if node.unit_count == 0 || !reach.is_linked(node) {
            node.dispatch_timer = 0.0;
            continue;
        }

        node.dispatch_timer += dt;
        if node.dispatch_timer < config.send_interval {
            continue;
        }
        node.dispatch_timer -= config.send_interval;

        let Some(target) = targeting::choose_target(arena, id, config.reinforce_margin) else {
            continue;
        };
        let Some(node) = arena.get_mut(id) else {
            continue;
        };
        node.unit_count -= 1;

        let unit = Unit {
            id: *next_unit_id,
            origin: id,
            destination: target.node,
            owner: node.owner,
            progress: 0.0,
        };
        *next_unit_id += 1;
        world.spawn((unit,));

        debug!(
            unit = unit.id,
            origin = id.0,
            destination = target.node.0,
            intent = ?target.intent,
            "unit dispatched"
        );
        events.push(SimEvent::UnitDispatched {
            unit: unit.id,
            origin: id,
            destination: target.node,
            intent: target.intent,
        });
    }
}
