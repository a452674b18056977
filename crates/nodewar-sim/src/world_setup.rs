//! Initial layout: two mirrored node trees.
//!
//! Tier `layer` of each tree holds `layer + 1` nodes stacked vertically.
//! The player tree grows rightward from its base, the enemy tree leftward.

use nodewar_core::enums::Faction;
use nodewar_core::types::{NodeId, Position};

use crate::arena::{Bases, NodeArena};
use crate::config::SimConfig;

/// Build the full node arena for a new match.
///
/// Nodes are created player tree first, tier by tier; each tree's first node
/// is its base. No connections exist yet and every garrison is empty.
pub fn build_layout(config: &SimConfig) -> (NodeArena, Bases) {
    let mut arena = NodeArena::new();
    let player = spawn_tree(&mut arena, config, Faction::Player);
    let enemy = spawn_tree(&mut arena, config, Faction::Enemy);
    (arena, Bases { player, enemy })
}

/// Spawn one faction's tree and return its base.
fn spawn_tree(arena: &mut NodeArena, config: &SimConfig, faction: Faction) -> NodeId {
    let base_x = match faction {
        Faction::Player => config.player_base_x,
        Faction::Enemy => config.enemy_base_x,
    };
    let direction = faction.advance_direction();

    let base = arena.spawn(
        Position::new(base_x, config.layout_top_y),
        0,
        faction,
        config.node_capacity,
    );

    for layer in 1..config.layers {
        let x = base_x + direction * f64::from(layer) * config.layer_gap_x;
        for i in 0..=layer {
            let y = config.layout_top_y + f64::from(i) * config.node_gap_y;
            arena.spawn(Position::new(x, y), layer, faction, config.node_capacity);
        }
    }

    base
}
