//! Connectivity graph: roads between nodes and reachability from each base.
//!
//! Validation (`check_connection`) and mutation (`create_connection`) are
//! kept apart. Callers validate first; `create_connection` only guards the
//! structural invariants (no self-loops, no duplicates, symmetry).

use std::collections::VecDeque;

use nodewar_core::components::Node;
use nodewar_core::enums::{ConnectRejection, Faction};
use nodewar_core::types::NodeId;

use crate::arena::{Bases, NodeArena};

/// Rule switches for road building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkRules {
    /// Allow a road whose target is owned by the other faction.
    pub allow_assault_links: bool,
}

/// Per-faction reachability from the base, computed once per tick.
#[derive(Debug, Clone, Default)]
pub struct Reachability {
    player: Vec<bool>,
    enemy: Vec<bool>,
}

impl Reachability {
    pub fn compute(arena: &NodeArena, bases: &Bases) -> Self {
        Self {
            player: reachable_set(arena, bases, Faction::Player),
            enemy: reachable_set(arena, bases, Faction::Enemy),
        }
    }

    /// Whether `id` is reached from `faction`'s base.
    pub fn contains(&self, faction: Faction, id: NodeId) -> bool {
        let set = match faction {
            Faction::Player => &self.player,
            Faction::Enemy => &self.enemy,
        };
        set.get(id.index()).copied().unwrap_or(false)
    }

    /// Whether `node` is linked to its own owner's base.
    pub fn is_linked(&self, node: &Node) -> bool {
        self.contains(node.owner, node.id)
    }
}

/// Breadth-first search from `faction`'s base over roads whose endpoints are
/// both owned by `faction`. Indexed by node index.
///
/// A base that has changed hands reaches nothing, not even itself.
pub fn reachable_set(arena: &NodeArena, bases: &Bases, faction: Faction) -> Vec<bool> {
    let mut seen = vec![false; arena.len()];
    let base = bases.of(faction);
    match arena.get(base) {
        Some(node) if node.owner == faction => {}
        _ => return seen,
    }

    let mut queue = VecDeque::new();
    seen[base.index()] = true;
    queue.push_back(base);

    while let Some(current) = queue.pop_front() {
        let Some(node) = arena.get(current) else {
            continue;
        };
        for &next in &node.connections {
            let Some(neighbor) = arena.get(next) else {
                continue;
            };
            if neighbor.owner != faction || seen[next.index()] {
                continue;
            }
            seen[next.index()] = true;
            queue.push_back(next);
        }
    }

    seen
}

/// Whether `node` is owned by `faction` and linked to that faction's base.
pub fn is_reachable_from_base(
    arena: &NodeArena,
    bases: &Bases,
    node: NodeId,
    faction: Faction,
) -> bool {
    match arena.get(node) {
        Some(n) if n.owner == faction => {}
        _ => return false,
    }
    if node == bases.of(faction) {
        return true;
    }
    reachable_set(arena, bases, faction)
        .get(node.index())
        .copied()
        .unwrap_or(false)
}

/// Whether a road joins `a` and `b`, checked from both ends.
pub fn connection_exists(arena: &NodeArena, a: NodeId, b: NodeId) -> bool {
    let listed = |from: NodeId, to: NodeId| {
        arena
            .get(from)
            .is_some_and(|node| node.connections.contains(&to))
    };
    listed(a, b) || listed(b, a)
}

/// Validate a road from `from` to `to` requested by `faction`.
pub fn check_connection(
    arena: &NodeArena,
    bases: &Bases,
    from: NodeId,
    to: NodeId,
    faction: Faction,
    rules: LinkRules,
) -> Result<(), ConnectRejection> {
    let (Some(source), Some(target)) = (arena.get(from), arena.get(to)) else {
        return Err(ConnectRejection::UnknownNode);
    };
    if from == to {
        return Err(ConnectRejection::SelfLink);
    }
    if source.owner != faction {
        return Err(ConnectRejection::NotOwner);
    }
    if !is_reachable_from_base(arena, bases, from, faction) {
        return Err(ConnectRejection::Unreachable);
    }
    if target.owner != faction && !rules.allow_assault_links {
        return Err(ConnectRejection::CrossFaction);
    }
    if source.layer.abs_diff(target.layer) > 1 {
        return Err(ConnectRejection::LayerGap);
    }
    if connection_exists(arena, from, to) {
        return Err(ConnectRejection::Duplicate);
    }
    Ok(())
}

/// Boolean form of `check_connection`.
pub fn can_create_connection(
    arena: &NodeArena,
    bases: &Bases,
    from: NodeId,
    to: NodeId,
    faction: Faction,
    rules: LinkRules,
) -> bool {
    check_connection(arena, bases, from, to, faction, rules).is_ok()
}

/// Add the road `a`-`b` to both endpoints. Returns whether anything changed.
///
/// Does not apply the building rules; see `check_connection`.
pub fn create_connection(arena: &mut NodeArena, a: NodeId, b: NodeId) -> bool {
    if a == b || !arena.contains(a) || !arena.contains(b) || connection_exists(arena, a, b) {
        return false;
    }
    if let Some(node) = arena.get_mut(a) {
        node.connections.push(b);
    }
    if let Some(node) = arena.get_mut(b) {
        node.connections.push(a);
    }
    true
}
