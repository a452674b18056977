//! Scripted orders: player commands issued at scheduled times.
//!
//! An orders file is a JSON list such as
//! `[{ "at_secs": 0.0, "command": { "type": "Connect", "from": 0, "to": 1 } }]`.
//! Times are seconds of loop clock, counted from the first tick.

use serde::{Deserialize, Serialize};

use nodewar_core::commands::PlayerCommand;

/// A single scheduled command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledOrder {
    /// Loop time at which the command is issued.
    pub at_secs: f64,
    pub command: PlayerCommand,
    /// Whether this order has already been issued.
    #[serde(skip)]
    pub issued: bool,
}

/// The complete order script for a run.
#[derive(Debug, Clone, Default)]
pub struct OrderSchedule {
    pub orders: Vec<ScheduledOrder>,
}

impl OrderSchedule {
    /// Parse a JSON order list. Orders are issued in time order; ties keep
    /// their file order.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut orders: Vec<ScheduledOrder> = serde_json::from_str(json)?;
        orders.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Ok(Self { orders })
    }

    /// Whether the script starts the game itself.
    pub fn starts_game(&self) -> bool {
        self.orders
            .iter()
            .any(|o| o.command == PlayerCommand::StartGame)
    }

    /// Start the game on the first tick unless the script already does.
    /// Returns whether an order was added.
    pub fn ensure_started(&mut self) -> bool {
        if self.starts_game() {
            return false;
        }
        self.orders.insert(
            0,
            ScheduledOrder {
                at_secs: 0.0,
                command: PlayerCommand::StartGame,
                issued: false,
            },
        );
        true
    }

    /// Orders not yet issued.
    pub fn pending(&self) -> usize {
        self.orders.iter().filter(|o| !o.issued).count()
    }

    /// Mark every order due at `now_secs` as issued and return its command.
    pub fn take_due(&mut self, now_secs: f64) -> Vec<PlayerCommand> {
        let mut due = Vec::new();
        for order in &mut self.orders {
            if !order.issued && now_secs >= order.at_secs {
                order.issued = true;
                due.push(order.command.clone());
            }
        }
        due
    }
}
