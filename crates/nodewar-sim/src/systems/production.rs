//! Production system: eligible nodes grow their garrison on a fixed interval.

use nodewar_core::components::Node;

use crate::arena::{Bases, NodeArena};
use crate::graph::Reachability;

/// Accumulate `dt` and turn every whole `interval` into one unit, up to capacity.
///
/// The timer drains even when the node is full, so a full node does not bank
/// a burst of production for later.
pub fn advance_production(node: &mut Node, dt: f64, interval: f64) {
    debug_assert!(interval > 0.0, "production interval must be positive");
    node.production_timer += dt;
    while node.production_timer >= interval {
        node.production_timer -= interval;
        if !node.is_full() {
            node.unit_count += 1;
        }
    }
}

/// Run production for every node.
///
/// Bases always produce; other nodes only while linked to their owner's
/// base. Ineligible nodes lose any partial progress.
pub fn run(arena: &mut NodeArena, bases: &Bases, reach: &Reachability, dt: f64, interval: f64) {
    for node in arena.iter_mut() {
        if bases.is_base(node.id) || reach.is_linked(node) {
            advance_production(node, dt, interval);
        } else {
            node.production_timer = 0.0;
        }
    }
}
