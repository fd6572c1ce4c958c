//! Game event representation
//!
//! Events delivered by the host server, plus the biome tracker that turns
//! per-tick position polls into discrete biome-change events.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TriggerType;

/// Stable identifier the host assigns to a connected player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The player an event concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    /// Host-assigned player id
    pub id: PlayerId,
    /// Display name, used for command substitution and announcements
    pub name: String,
}

impl PlayerRef {
    /// Create a player reference
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
        }
    }
}

/// An in-game event the host forwards to the trigger system
///
/// Every variant carries the acting player and a registry-style string value
/// (e.g. `minecraft:warden`) that trigger keywords are matched against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player crossed into a different biome
    BiomeEntered { player: PlayerRef, biome: String },
    /// Player changed dimension
    DimensionChanged { player: PlayerRef, dimension: String },
    /// Player picked an item up off the ground
    ItemPickedUp { player: PlayerRef, item_id: String },
    /// Player used (right-clicked) a held item
    ItemUsed { player: PlayerRef, item_id: String },
    /// Player killed a mob
    MobKilled { player: PlayerRef, mob_id: String },
    /// Player earned an advancement
    AdvancementEarned {
        player: PlayerRef,
        advancement_id: String,
    },
    /// A status effect was applied to the player
    StatusApplied { player: PlayerRef, effect_id: String },
}

impl GameEvent {
    /// Trigger type this event is matched against
    pub fn trigger_type(&self) -> TriggerType {
        match self {
            GameEvent::BiomeEntered { .. } => TriggerType::Biome,
            GameEvent::DimensionChanged { .. } => TriggerType::Dimension,
            GameEvent::ItemPickedUp { .. } | GameEvent::ItemUsed { .. } => TriggerType::Item,
            GameEvent::MobKilled { .. } => TriggerType::Mob,
            GameEvent::AdvancementEarned { .. } => TriggerType::Advancement,
            GameEvent::StatusApplied { .. } => TriggerType::Effect,
        }
    }

    /// The value keywords are matched against
    pub fn value(&self) -> &str {
        match self {
            GameEvent::BiomeEntered { biome, .. } => biome,
            GameEvent::DimensionChanged { dimension, .. } => dimension,
            GameEvent::ItemPickedUp { item_id, .. } => item_id,
            GameEvent::ItemUsed { item_id, .. } => item_id,
            GameEvent::MobKilled { mob_id, .. } => mob_id,
            GameEvent::AdvancementEarned { advancement_id, .. } => advancement_id,
            GameEvent::StatusApplied { effect_id, .. } => effect_id,
        }
    }

    /// The acting player
    pub fn player(&self) -> &PlayerRef {
        match self {
            GameEvent::BiomeEntered { player, .. }
            | GameEvent::DimensionChanged { player, .. }
            | GameEvent::ItemPickedUp { player, .. }
            | GameEvent::ItemUsed { player, .. }
            | GameEvent::MobKilled { player, .. }
            | GameEvent::AdvancementEarned { player, .. }
            | GameEvent::StatusApplied { player, .. } => player,
        }
    }
}

/// Tracks each player's last known biome between ticks
///
/// The host polls player positions every tick; this collapses the stream
/// into one `BiomeEntered` event per actual change, per player.
#[derive(Debug, Default)]
pub struct BiomeTracker {
    last_biome: HashMap<PlayerId, String>,
}

impl BiomeTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the biome a player is currently standing in
    ///
    /// Returns a `BiomeEntered` event when the biome differs from the last
    /// observation for that player. The first observation for a player also
    /// counts as entering.
    pub fn observe(&mut self, player: &PlayerRef, biome: &str) -> Option<GameEvent> {
        if biome.trim().is_empty() {
            return None;
        }

        let previous = self.last_biome.insert(player.id, biome.to_string());
        if previous.as_deref() == Some(biome) {
            return None;
        }

        Some(GameEvent::BiomeEntered {
            player: player.clone(),
            biome: biome.to_string(),
        })
    }

    /// Drop tracking state for a disconnected player
    pub fn forget(&mut self, player_id: PlayerId) {
        self.last_biome.remove(&player_id);
    }

    /// Drop all tracking state (e.g. when the world unloads)
    pub fn clear(&mut self) {
        self.last_biome.clear();
    }
}
