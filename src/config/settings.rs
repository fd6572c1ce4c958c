//! Runtime settings
//!
//! Tuning knobs for how fired triggers are announced and how effect values
//! are interpreted. Separate from the action list so server owners can
//! adjust behavior without touching their trigger definitions.

use serde::{Deserialize, Serialize};

use super::actions::TriggerType;

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether to broadcast an announcement when an action fires
    pub announce_triggers: bool,
    /// Announcement template; `{player}` and `{source}` are substituted
    pub announce_format: String,
    /// Token replaced with the triggering player's name in command effects
    pub player_token: String,
    /// Status-effect duration in ticks when the effect value omits one
    pub default_status_duration: u32,
    /// Status-effect amplifier when the effect value omits one
    pub default_status_amplifier: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            announce_triggers: true,
            announce_format: "§a[Warden]§r Something felt the changes from §7{source}§r ({player})"
                .to_string(),
            player_token: "@p".to_string(),
            default_status_duration: 200,
            default_status_amplifier: 0,
        }
    }
}

impl Settings {
    /// Settings for servers that want triggers to fire silently
    pub fn quiet_preset() -> Self {
        Self {
            announce_triggers: false,
            ..Default::default()
        }
    }

    /// Settings for story-heavy servers that narrate every trigger
    pub fn narrated_preset() -> Self {
        Self {
            announce_triggers: true,
            announce_format: "§5{player} has disturbed something ancient... §7({source})"
                .to_string(),
            ..Default::default()
        }
    }

    /// Render the announcement broadcast for a fired action
    pub fn format_announcement(&self, player_name: &str, source: TriggerType) -> String {
        self.announce_format
            .replace("{player}", player_name)
            .replace("{source}", source.as_str())
    }

    /// Substitute the player token in a command effect value
    pub fn substitute_player(&self, command: &str, player_name: &str) -> String {
        if self.player_token.is_empty() {
            return command.to_string();
        }
        command.replace(&self.player_token, player_name)
    }
}
