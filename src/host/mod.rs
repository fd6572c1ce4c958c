//! Host-facing action surface
//!
//! The trigger system never touches the game world directly. Evaluating an
//! event produces a list of `HostAction` values that the embedding server
//! executes on its main thread, in order.

use serde::{Deserialize, Serialize};

use crate::event::PlayerId;

/// A world mutation for the host server to carry out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostAction {
    /// Run a server command at full permission with suppressed output
    RunCommand { command: String },
    /// Broadcast a system chat message to all players
    Broadcast { message: String },
    /// Give an item to a player; the host drops the stack at the player's
    /// feet when the inventory is full
    GiveItem { player: PlayerId, item_id: String },
    /// Apply a status effect to a player
    ApplyStatus { player: PlayerId, status: StatusSpec },
}

/// A parsed status-effect payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSpec {
    /// Registry id of the effect, e.g. `minecraft:darkness`
    pub effect_id: String,
    /// Duration in game ticks
    pub duration_ticks: u32,
    /// Effect amplifier (0 = level I)
    pub amplifier: u32,
}

impl StatusSpec {
    /// Parse an effect value of the form
    /// `namespace:effect[:duration_ticks[:amplifier]]`.
    ///
    /// Returns `None` when the value has no namespace, or when a duration or
    /// amplifier segment is present but not a number.
    pub fn parse(value: &str, default_duration: u32, default_amplifier: u32) -> Option<Self> {
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() < 2 || parts[0].trim().is_empty() || parts[1].trim().is_empty() {
            return None;
        }

        let effect_id = format!("{}:{}", parts[0].trim(), parts[1].trim());

        let duration_ticks = match parts.get(2) {
            Some(raw) => raw.trim().parse().ok()?,
            None => default_duration,
        };
        let amplifier = match parts.get(3) {
            Some(raw) => raw.trim().parse().ok()?,
            None => default_amplifier,
        };

        Some(Self {
            effect_id,
            duration_ticks,
            amplifier,
        })
    }
}
