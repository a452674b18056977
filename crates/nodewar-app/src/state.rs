//! State shared between the runner's main thread and the game loop thread.

use std::sync::{Arc, Mutex};

use nodewar_core::commands::PlayerCommand;
use nodewar_core::state::GameStateSnapshot;

/// Commands sent from the main thread to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot published by the game loop after each tick.
/// `None` until the first tick completes.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

/// Why the game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The game ended and the quit request was honored.
    GameOver,
    /// The loop clock passed the configured limit.
    TimeLimit,
    /// A `Shutdown` command arrived.
    Shutdown,
    /// Every command sender was dropped.
    Disconnected,
}

/// What the game loop thread hands back when it exits.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub reason: StopReason,
    pub ticks: u64,
    pub final_snapshot: GameStateSnapshot,
}
