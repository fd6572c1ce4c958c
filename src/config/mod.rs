//! Configuration module
//!
//! Handles the action/trigger/effect definitions and runtime settings.

pub mod actions;
pub mod settings;

pub use actions::{
    ActionConfig, ActionDefinition, ConfigError, Effect, EffectKind, TriggerRule, TriggerType,
};
pub use settings::Settings;
