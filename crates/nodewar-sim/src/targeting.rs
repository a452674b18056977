//! Target selection for dispatched units.
//!
//! Pure functions over the node arena. A sender sorts its neighbors into an
//! advance pool and a reinforce pool, picks a pool (alternating when both
//! have candidates), then rotates through that pool with a round-robin
//! counter shared by both pools.

use nodewar_core::enums::DispatchIntent;
use nodewar_core::types::NodeId;

use crate::arena::NodeArena;

/// The two candidate pools of a sender, in connection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Neighbors on the sender's advancing side, any owner.
    pub forward: Vec<NodeId>,
    /// Same-owner, same-layer neighbors holding at least `margin` fewer units.
    pub reinforce: Vec<NodeId>,
}

/// A chosen destination and the pool it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub node: NodeId,
    pub intent: DispatchIntent,
}

/// Sort `source`'s neighbors into the two pools. Unknown handles are skipped.
pub fn candidates(arena: &NodeArena, source: NodeId, reinforce_margin: u32) -> Candidates {
    let mut pools = Candidates::default();
    let Some(sender) = arena.get(source) else {
        return pools;
    };
    let direction = sender.owner.advance_direction();

    for &id in &sender.connections {
        let Some(neighbor) = arena.get(id) else {
            continue;
        };
        if (neighbor.position.x - sender.position.x) * direction > 0.0 {
            pools.forward.push(id);
        }
        if neighbor.owner == sender.owner
            && neighbor.layer == sender.layer
            && sender
                .unit_count
                .checked_sub(reinforce_margin)
                .is_some_and(|limit| neighbor.unit_count <= limit)
        {
            pools.reinforce.push(id);
        }
    }

    pools
}

/// Choose where `source` sends its next unit, advancing its rotation state.
///
/// Returns `None` and leaves the sender untouched when neither pool has a
/// candidate. The pool preference only flips when both pools were non-empty.
pub fn choose_target(
    arena: &mut NodeArena,
    source: NodeId,
    reinforce_margin: u32,
) -> Option<Target> {
    let pools = candidates(arena, source, reinforce_margin);
    let sender = arena.get_mut(source)?;

    let intent = match (pools.forward.is_empty(), pools.reinforce.is_empty()) {
        (true, true) => return None,
        (false, true) => DispatchIntent::Advance,
        (true, false) => DispatchIntent::Reinforce,
        (false, false) => {
            let intent = sender.next_intent;
            sender.next_intent = intent.flipped();
            intent
        }
    };

    let pool = match intent {
        DispatchIntent::Advance => &pools.forward,
        DispatchIntent::Reinforce => &pools.reinforce,
    };
    let node = pool[sender.round_robin % pool.len()];
    sender.round_robin = sender.round_robin.wrapping_add(1);

    Some(Target { node, intent })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::graph::create_connection;
    use crate::world_setup::build_layout;
    use nodewar_core::enums::Faction;

    const MARGIN: u32 = 2;

    fn layout() -> NodeArena {
        build_layout(&SimConfig::default()).0
    }

    fn set_units(arena: &mut NodeArena, id: u32, count: u32) {
        arena.get_mut(NodeId(id)).unwrap().unit_count = count;
    }

    #[test]
    fn test_forward_pool_depends_on_faction_direction() {
        let mut arena = layout();
        // Player tier 1 node 1 (x=270): base 0 behind, tier-2 node 3 ahead.
        create_connection(&mut arena, NodeId(1), NodeId(0));
        create_connection(&mut arena, NodeId(1), NodeId(3));
        let pools = candidates(&arena, NodeId(1), MARGIN);
        assert_eq!(pools.forward, vec![NodeId(3)]);

        // Enemy tier 1 node 7 (x=680): base 6 behind (x=800), node 9 ahead (x=560).
        create_connection(&mut arena, NodeId(7), NodeId(6));
        create_connection(&mut arena, NodeId(7), NodeId(9));
        let pools = candidates(&arena, NodeId(7), MARGIN);
        assert_eq!(pools.forward, vec![NodeId(9)]);
    }

    #[test]
    fn test_margin_larger_than_garrison() {
        let mut arena = layout();
        create_connection(&mut arena, NodeId(1), NodeId(2));
        set_units(&mut arena, 1, 10);
        assert!(candidates(&arena, NodeId(1), u32::MAX).reinforce.is_empty());
        assert!(candidates(&arena, NodeId(1), 11).reinforce.is_empty());
        assert_eq!(candidates(&arena, NodeId(1), 10).reinforce, vec![NodeId(2)]);
    }

    #[test]
    fn test_same_column_is_not_forward() {
        let mut arena = layout();
        create_connection(&mut arena, NodeId(1), NodeId(2));
        let pools = candidates(&arena, NodeId(1), MARGIN);
        assert!(pools.forward.is_empty());
    }

    #[test]
    fn test_reinforce_requires_margin() {
        let mut arena = layout();
        create_connection(&mut arena, NodeId(1), NodeId(2));
        set_units(&mut arena, 1, 5);
        set_units(&mut arena, 2, 4);
        assert!(candidates(&arena, NodeId(1), MARGIN).reinforce.is_empty());

        set_units(&mut arena, 2, 3);
        assert_eq!(candidates(&arena, NodeId(1), MARGIN).reinforce, vec![NodeId(2)]);
    }

    #[test]
    fn test_reinforce_ignores_other_layers_and_owners() {
        let mut arena = layout();
        create_connection(&mut arena, NodeId(1), NodeId(0));
        create_connection(&mut arena, NodeId(1), NodeId(2));
        set_units(&mut arena, 1, 10);
        arena.get_mut(NodeId(2)).unwrap().owner = Faction::Enemy;
        let pools = candidates(&arena, NodeId(1), MARGIN);
        assert!(pools.reinforce.is_empty());
    }

    #[test]
    fn test_no_candidates_leaves_sender_untouched() {
        let mut arena = layout();
        create_connection(&mut arena, NodeId(1), NodeId(0));
        set_units(&mut arena, 1, 3);
        assert!(choose_target(&mut arena, NodeId(1), MARGIN).is_none());
        let sender = arena.get(NodeId(1)).unwrap();
        assert_eq!(sender.round_robin, 0);
        assert_eq!(sender.next_intent, DispatchIntent::Advance);
    }

    #[test]
    fn test_round_robin_visits_each_neighbor_once() {
        let mut arena = layout();
        // Player tier 1 node 1 fans out to tier 2 nodes 3, 4, 5.
        for to in [3, 4, 5] {
            create_connection(&mut arena, NodeId(1), NodeId(to));
        }
        set_units(&mut arena, 1, 10);

        let picks: Vec<NodeId> = (0..6)
            .map(|_| choose_target(&mut arena, NodeId(1), MARGIN).unwrap().node)
            .collect();
        assert_eq!(
            picks,
            vec![NodeId(3), NodeId(4), NodeId(5), NodeId(3), NodeId(4), NodeId(5)]
        );
    }

    #[test]
    fn test_intent_alternates_when_both_pools_filled() {
        let mut arena = layout();
        create_connection(&mut arena, NodeId(1), NodeId(3));
        create_connection(&mut arena, NodeId(1), NodeId(2));
        set_units(&mut arena, 1, 20);

        let intents: Vec<DispatchIntent> = (0..4)
            .map(|_| choose_target(&mut arena, NodeId(1), MARGIN).unwrap().intent)
            .collect();
        assert_eq!(
            intents,
            vec![
                DispatchIntent::Advance,
                DispatchIntent::Reinforce,
                DispatchIntent::Advance,
                DispatchIntent::Reinforce,
            ]
        );
    }

    #[test]
    fn test_single_pool_does_not_flip_preference() {
        let mut arena = layout();
        create_connection(&mut arena, NodeId(1), NodeId(3));
        set_units(&mut arena, 1, 5);
        for _ in 0..3 {
            let target = choose_target(&mut arena, NodeId(1), MARGIN).unwrap();
            assert_eq!(target.intent, DispatchIntent::Advance);
        }
        assert_eq!(arena.get(NodeId(1)).unwrap().next_intent, DispatchIntent::Advance);
        assert_eq!(arena.get(NodeId(1)).unwrap().round_robin, 3);
    }
}
