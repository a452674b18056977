//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Left-hand tree; advances toward +x.
    #[default]
    Player,
    /// Right-hand tree; advances toward -x.
    Enemy,
}

impl Faction {
    /// Both factions, in layout order.
    pub const ALL: [Faction; 2] = [Faction::Player, Faction::Enemy];

    /// Sign of the horizontal direction this faction pushes toward.
    pub fn advance_direction(self) -> f64 {
        match self {
            Faction::Player => 1.0,
            Faction::Enemy => -1.0,
        }
    }
}

/// Which candidate pool a node draws its next target from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchIntent {
    /// Push toward the opposing faction.
    #[default]
    Advance,
    /// Top up a weaker same-layer ally.
    Reinforce,
}

impl DispatchIntent {
    /// The other intent.
    pub fn flipped(self) -> DispatchIntent {
        match self {
            DispatchIntent::Advance => DispatchIntent::Reinforce,
            DispatchIntent::Reinforce => DispatchIntent::Advance,
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Layout exists, clock is stopped. Connections may still be planned.
    #[default]
    NotStarted,
    Running,
    /// A base has fallen. Terminal.
    Ended,
}

/// Why a connection request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectRejection {
    /// Either handle does not name a node.
    UnknownNode,
    /// Source and target are the same node.
    SelfLink,
    /// The source is not owned by the requesting faction.
    NotOwner,
    /// The source is neither a base nor reachable from its base.
    Unreachable,
    /// The target belongs to another faction.
    CrossFaction,
    /// The two layers are more than one tier apart.
    LayerGap,
    /// The road already exists.
    Duplicate,
    /// The match is over.
    GameOver,
}
