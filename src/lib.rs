//! Event Warden - config-driven event triggers for game servers
//!
//! This library listens to in-game player events forwarded by a host server
//! (biome changes, item pickups, mob kills, advancements, status effects)
//! and, when a configured keyword and probability match occurs, plans server
//! commands, broadcasts, item grants, or status effects for the host to
//! execute. One-shot actions are persisted per world save.
//!
//! ## Host contract
//!
//! The host owns the event loop and all world mutation. It forwards events
//! on its main thread and executes the returned [`HostAction`]s in order;
//! nothing here spawns threads or performs I/O beyond config and save files.

pub mod config;
pub mod discovery;
pub mod engine;
pub mod event;
pub mod host;
pub mod persistence;

use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::OnceCell;

use crate::config::{ActionConfig, Settings};
use crate::engine::TriggerEngine;
use crate::event::{BiomeTracker, GameEvent, PlayerRef};
use crate::host::HostAction;
use crate::persistence::CompletedActions;

pub use crate::config::{ActionDefinition, Effect, EffectKind, TriggerRule, TriggerType};
pub use crate::host::StatusSpec;

/// Top-level trigger system state
pub struct Warden {
    engine: TriggerEngine,
    actions: ActionConfig,
    completed: CompletedActions,
    biomes: BiomeTracker,
}

impl Warden {
    /// Create a new instance with the given settings and actions
    pub fn new(settings: Settings, actions: ActionConfig) -> Self {
        Self {
            engine: TriggerEngine::new(settings),
            actions,
            completed: CompletedActions::new(),
            biomes: BiomeTracker::new(),
        }
    }

    /// Bind completion state to a world save (call when the server starts)
    pub fn attach_world(&mut self, save_root: &Path) {
        self.completed = CompletedActions::attach(save_root);
        log::info!(
            "attached to world save at {} ({} actions already completed)",
            save_root.display(),
            self.completed.len()
        );
    }

    /// Release world state (call when the server stops)
    pub fn detach_world(&mut self) {
        self.completed = CompletedActions::new();
        self.biomes.clear();
    }

    /// Evaluate one event, returning host actions to execute in order
    pub fn handle_event(&mut self, event: &GameEvent) -> Vec<HostAction> {
        self.engine
            .handle_event(event, &self.actions, &mut self.completed)
    }

    /// Feed a per-tick biome poll; evaluates a biome-change event when the
    /// player actually crossed into a different biome.
    pub fn observe_biome(&mut self, player: &PlayerRef, biome: &str) -> Vec<HostAction> {
        match self.biomes.observe(player, biome) {
            Some(event) => self.handle_event(&event),
            None => Vec::new(),
        }
    }

    /// The loaded action configuration
    pub fn actions(&self) -> &ActionConfig {
        &self.actions
    }

    /// The engine's runtime settings
    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }

    /// Completion state for the current world
    pub fn completed(&self) -> &CompletedActions {
        &self.completed
    }
}

/// Global instance for hosts that load the crate as a plugin
static WARDEN_INSTANCE: OnceCell<Mutex<Warden>> = OnceCell::new();

/// Initialize the global instance
pub fn init_warden(settings: Settings, actions: ActionConfig) {
    let _ = WARDEN_INSTANCE.set(Mutex::new(Warden::new(settings, actions)));
}

/// Get a reference to the global instance
pub fn get_warden() -> Option<&'static Mutex<Warden>> {
    WARDEN_INSTANCE.get()
}
