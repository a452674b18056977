//! Game loop thread: runs the simulation engine at a fixed rate and publishes snapshots.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive via an `mpsc` channel; the latest snapshot is
//! stored in shared state for polling, and the final one is returned through
//! the thread's `JoinHandle`.

use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use nodewar_core::commands::PlayerCommand;
use nodewar_core::constants::TICK_RATE;
use nodewar_core::enums::GamePhase;
use nodewar_core::state::GameStateSnapshot;
use nodewar_sim::{SimConfig, SimulationEngine};

use crate::orders::OrderSchedule;
use crate::state::{GameLoopCommand, LoopOutcome, SharedSnapshot, StopReason};

/// How the loop steps the engine.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Ticks per second. Each tick advances the engine by `1 / tick_rate`.
    pub tick_rate: u32,
    /// Stop once the loop clock reaches this many seconds.
    pub max_secs: Option<f64>,
    /// Sleep between ticks to hold real time. Off for batch runs.
    pub paced: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            max_secs: None,
            paced: true,
        }
    }
}

impl LoopSettings {
    /// Simulated seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }

    /// Nominal wall-clock duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the loop's outcome.
/// Keep the sender alive until the loop is joined: dropping every sender
/// stops the loop.
pub fn spawn_game_loop(
    config: SimConfig,
    orders: OrderSchedule,
    settings: LoopSettings,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopOutcome>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("nodewar-game-loop".into())
        .spawn(move || {
            run_game_loop(config, orders, settings, cmd_rx, &latest_snapshot)
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the game is over and quit, the time limit
/// passes, a `Shutdown` arrives, or the channel disconnects.
pub fn run_game_loop(
    config: SimConfig,
    mut orders: OrderSchedule,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> LoopOutcome {
    let mut engine = SimulationEngine::new(config);
    let dt = settings.dt();
    let tick_duration = settings.tick_duration();
    let mut ticks: u64 = 0;
    let mut quit_sent = false;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    return finish(&engine, StopReason::Shutdown, ticks);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    return finish(&engine, StopReason::Disconnected, ticks);
                }
            }
        }

        // 2. Scripted orders due on the loop clock
        let due = orders.take_due(ticks as f64 * dt);
        if !due.is_empty() {
            debug!(
                count = due.len(),
                pending = orders.pending(),
                "issuing scripted orders"
            );
            engine.queue_commands(due);
        }

        // 3. Advance one tick
        let snapshot = engine.tick(dt);
        ticks += 1;
        let ended = snapshot.phase == GamePhase::Ended;

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Stop conditions
        if engine.quit_requested() {
            return finish(&engine, StopReason::GameOver, ticks);
        }
        if ended && !quit_sent {
            engine.queue_command(PlayerCommand::RequestQuit);
            quit_sent = true;
        }
        if settings
            .max_secs
            .is_some_and(|max| ticks as f64 * dt >= max)
        {
            return finish(&engine, StopReason::TimeLimit, ticks);
        }

        // 6. Sleep until next tick
        if settings.paced {
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick_duration * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

fn finish(engine: &SimulationEngine, reason: StopReason, ticks: u64) -> LoopOutcome {
    info!(?reason, ticks, "game loop stopped");
    LoopOutcome {
        reason,
        ticks,
        final_snapshot: engine.snapshot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodewar_core::enums::Faction;
    use nodewar_core::types::NodeId;

    use crate::state::shared_snapshot;

    fn batch(max_secs: f64) -> LoopSettings {
        LoopSettings {
            max_secs: Some(max_secs),
            paced: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::ClearSelection))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_shutdown_before_first_tick() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let latest = Mutex::new(None);

        let outcome = run_game_loop(
            SimConfig::default(),
            OrderSchedule::default(),
            batch(10.0),
            rx,
            &latest,
        );
        assert_eq!(outcome.reason, StopReason::Shutdown);
        assert_eq!(outcome.ticks, 0);
        assert!(latest.lock().unwrap().is_none());
    }

    #[test]
    fn test_dropped_sender_stops_loop() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        drop(tx);
        let latest = Mutex::new(None);

        let outcome = run_game_loop(
            SimConfig::default(),
            OrderSchedule::default(),
            batch(10.0),
            rx,
            &latest,
        );
        assert_eq!(outcome.reason, StopReason::Disconnected);
    }

    #[test]
    fn test_time_limit_stops_loop() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        let latest = Mutex::new(None);

        let outcome = run_game_loop(
            SimConfig::default(),
            OrderSchedule::default(),
            batch(2.0),
            rx,
            &latest,
        );
        assert_eq!(outcome.reason, StopReason::TimeLimit);
        assert!((60..=61).contains(&outcome.ticks));

        let snap = outcome.final_snapshot;
        assert_eq!(snap.phase, GamePhase::Running);
        assert!((snap.time.elapsed_secs - 2.0).abs() < 0.05);
        // Bases produce two units per second.
        let garrison = snap.node(NodeId(0)).unwrap().unit_count;
        assert!((3..=4).contains(&garrison), "garrison {garrison}");
        assert!(latest.lock().unwrap().is_some());
        drop(tx);
    }

    #[test]
    fn test_auto_start_runs_from_first_tick() {
        let mut orders = OrderSchedule::default();
        assert!(orders.ensure_started());
        let (tx, rx) = mpsc::channel();
        let latest = Mutex::new(None);

        let outcome = run_game_loop(
            SimConfig::default(),
            orders,
            batch(1.0),
            rx,
            &latest,
        );
        assert_eq!(outcome.reason, StopReason::TimeLimit);
        assert_eq!(outcome.final_snapshot.phase, GamePhase::Running);
        assert_eq!(outcome.final_snapshot.time.tick, outcome.ticks);
        drop(tx);
    }

    #[test]
    fn test_scripted_duel_ends_with_quit() {
        // One node per side, a single-unit garrison and a direct road: the
        // lower unit id is resolved first, so the player's unit lands first.
        let config = SimConfig {
            layers: 1,
            node_capacity: 1,
            allow_assault_links: true,
            ..Default::default()
        };
        let orders = OrderSchedule::from_json_str(
            r#"[
                { "at_secs": 0.0, "command": { "type": "Connect", "from": 0, "to": 1 } },
                { "at_secs": 0.0, "command": { "type": "StartGame" } }
            ]"#,
        )
        .unwrap();
        let (tx, rx) = mpsc::channel();
        let latest = Mutex::new(None);

        let outcome = run_game_loop(config, orders, batch(30.0), rx, &latest);
        assert_eq!(outcome.reason, StopReason::GameOver);
        assert_eq!(outcome.final_snapshot.phase, GamePhase::Ended);
        assert_eq!(outcome.final_snapshot.winner, Some(Faction::Player));
        assert_eq!(
            outcome.final_snapshot.node(NodeId(1)).unwrap().owner,
            Faction::Player
        );
        drop(tx);
    }

    #[test]
    fn test_spawned_loop_publishes_snapshots() {
        let latest = shared_snapshot();
        let (tx, handle) = spawn_game_loop(
            SimConfig::default(),
            OrderSchedule::default(),
            batch(0.5),
            latest.clone(),
        )
        .unwrap();
        // The unpaced loop may already be done; a failed send is fine here.
        let _ = tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame));

        let outcome = handle.join().unwrap();
        drop(tx);
        assert_eq!(outcome.reason, StopReason::TimeLimit);
        let published = latest.lock().unwrap().clone().unwrap();
        assert_eq!(published.time.tick, outcome.final_snapshot.time.tick);
    }

    #[test]
    fn test_tick_duration() {
        let settings = LoopSettings::default();
        let expected_nanos = 1_000_000_000u64 / 30;
        assert_eq!(settings.tick_duration().as_nanos(), expected_nanos as u128);
        assert!((settings.dt() - 1.0 / 30.0).abs() < 1e-15);
    }
}
