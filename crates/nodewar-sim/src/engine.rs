//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the node arena and the hecs world of units in
//! transit, processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use tracing::{info, trace};

use nodewar_core::commands::PlayerCommand;
use nodewar_core::components::Node;
use nodewar_core::constants::NODE_RADIUS;
use nodewar_core::enums::{ConnectRejection, Faction, GamePhase};
use nodewar_core::events::SimEvent;
use nodewar_core::state::GameStateSnapshot;
use nodewar_core::types::{NodeId, Position, SimTime};

use crate::arena::{Bases, NodeArena};
use crate::config::SimConfig;
use crate::graph::{self, LinkRules, Reachability};
use crate::systems;
use crate::systems::snapshot::FrameInfo;
use crate::world_setup;

/// The simulation engine. Owns the arena, the unit world and all sim state.
pub struct SimulationEngine {
    world: World,
    nodes: NodeArena,
    bases: Bases,
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    winner: Option<Faction>,
    selected: Option<NodeId>,
    quit_requested: bool,
    next_unit_id: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine with the layout described by `config`.
    ///
    /// The config is expected to have passed `SimConfig::validate`.
    pub fn new(config: SimConfig) -> Self {
        let (nodes, bases) = world_setup::build_layout(&config);
        Self {
            world: World::new(),
            nodes,
            bases,
            config,
            time: SimTime::default(),
            phase: GamePhase::default(),
            winner: None,
            selected: None,
            quit_requested: false,
            next_unit_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Queued commands are applied first. Systems only run while the game is
    /// running; a non-positive or non-finite `dt` applies commands only.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Running {
            if dt.is_finite() && dt > 0.0 {
                self.run_systems(dt);
                self.time.advance(dt);
            } else {
                trace!(dt, "ignoring degenerate tick length");
            }
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Snapshot of the current state without advancing. Pending events stay queued.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    // --- Input operations ---

    /// Select `node` as the origin of the next road.
    ///
    /// Succeeds only for a base or a node linked to its owner's base, and
    /// never once the game has ended. A failed selection keeps the old one.
    pub fn select_node(&mut self, node: NodeId) -> bool {
        if self.phase == GamePhase::Ended {
            return false;
        }
        let Some(owner) = self.nodes.get(node).map(|n| n.owner) else {
            return false;
        };
        if !self.bases.is_base(node) && !self.is_reachable(node, owner) {
            trace!(node = node.0, "selection refused: node not linked to its base");
            return false;
        }
        self.selected = Some(node);
        true
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Build a road from `from` to `to` on behalf of `from`'s owner.
    ///
    /// Validates first and only mutates on success. The selection is cleared
    /// either way, matching a two-click select-then-connect gesture.
    pub fn attempt_connect(&mut self, from: NodeId, to: NodeId) -> bool {
        self.selected = None;

        let result = if self.phase == GamePhase::Ended {
            Err(ConnectRejection::GameOver)
        } else {
            match self.nodes.get(from) {
                Some(source) => graph::check_connection(
                    &self.nodes,
                    &self.bases,
                    from,
                    to,
                    source.owner,
                    self.link_rules(),
                ),
                None => Err(ConnectRejection::UnknownNode),
            }
        };

        match result {
            Ok(()) => {
                graph::create_connection(&mut self.nodes, from, to);
                info!(a = from.0, b = to.0, "connection created");
                self.events.push(SimEvent::ConnectionCreated { a: from, b: to });
                true
            }
            Err(reason) => {
                trace!(from = from.0, to = to.0, ?reason, "connection rejected");
                self.events
                    .push(SimEvent::ConnectionRejected { from, to, reason });
                false
            }
        }
    }

    /// Start the clock. Only valid before the game has started.
    pub fn start_game(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Running;
        info!("game started");
        self.events.push(SimEvent::GameStarted);
        true
    }

    /// Ask to leave. Honored only once the game has ended.
    pub fn request_quit(&mut self) -> bool {
        if self.phase != GamePhase::Ended {
            return false;
        }
        self.quit_requested = true;
        true
    }

    // --- Queries ---

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The faction that captured a base, once the game has ended.
    pub fn winner(&self) -> Option<Faction> {
        self.winner
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Read-only view of every node.
    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn bases(&self) -> Bases {
        self.bases
    }

    /// Number of units currently in transit.
    pub fn units_in_flight(&self) -> usize {
        self.world.len() as usize
    }

    /// Whether `node` is owned by `faction` and linked to its base.
    pub fn is_reachable(&self, node: NodeId, faction: Faction) -> bool {
        graph::is_reachable_from_base(&self.nodes, &self.bases, node, faction)
    }

    /// Whether a road `from`-`to` would currently be accepted for `faction`.
    pub fn can_connect(&self, from: NodeId, to: NodeId, faction: Faction) -> bool {
        graph::can_create_connection(
            &self.nodes,
            &self.bases,
            from,
            to,
            faction,
            self.link_rules(),
        )
    }

    /// Node under a layout-space point, for input layers doing hit tests.
    pub fn pick_node(&self, point: Position) -> Option<NodeId> {
        self.nodes.pick(point, NODE_RADIUS)
    }

    /// Mutable node access for test setup.
    #[cfg(test)]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Put a unit on the road directly (for tests staging combat).
    #[cfg(test)]
    pub fn spawn_test_unit(&mut self, origin: NodeId, destination: NodeId, owner: Faction) -> u64 {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        self.world.spawn((nodewar_core::components::Unit {
            id,
            origin,
            destination,
            owner,
            progress: 0.0,
        },));
        id
    }

    fn link_rules(&self) -> LinkRules {
        LinkRules {
            allow_assault_links: self.config.allow_assault_links,
        }
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.nodes,
            &self.bases,
            FrameInfo {
                time: self.time,
                phase: self.phase,
                winner: self.winner,
                selected: self.selected,
            },
            events,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SelectNode { node } => {
                self.select_node(node);
            }
            PlayerCommand::ClearSelection => self.clear_selection(),
            PlayerCommand::Connect { from, to } => {
                self.attempt_connect(from, to);
            }
            PlayerCommand::StartGame => {
                self.start_game();
            }
            PlayerCommand::RequestQuit => {
                self.request_quit();
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // Roads and owners only change outside this window, so one BFS per
        // faction serves both production and dispatch.
        let reach = Reachability::compute(&self.nodes, &self.bases);

        // 1. Production
        systems::production::run(
            &mut self.nodes,
            &self.bases,
            &reach,
            dt,
            self.config.production_interval,
        );
        // 2. Dispatch
        systems::dispatch::run(
            &mut self.world,
            &mut self.nodes,
            &reach,
            dt,
            &self.config,
            &mut self.next_unit_id,
            &mut self.events,
        );
        // 3. Transit
        systems::transit::run(&mut self.world, dt, self.config.unit_speed);
        // 4. Arrivals, captures, win detection
        let winner = systems::arrival::run(
            &mut self.world,
            &mut self.nodes,
            &self.bases,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        if let Some(winner) = winner {
            self.phase = GamePhase::Ended;
            self.winner = Some(winner);
            self.selected = None;
            info!(?winner, "base captured, game over");
            self.events.push(SimEvent::GameOver { winner });
        }
    }
}
