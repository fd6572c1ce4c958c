//! Trigger evaluation engine
//!
//! The core loop: for each incoming event, linearly scan the configured
//! actions that have not yet completed, match rules, roll probabilities,
//! and expand fired actions into host actions. Single-threaded by design;
//! the host engine serializes game ticks.

pub mod matcher;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ActionConfig, ActionDefinition, EffectKind, Settings};
use crate::event::{GameEvent, PlayerRef};
use crate::host::{HostAction, StatusSpec};
use crate::persistence::CompletedActions;

/// Evaluates events against the action configuration
///
/// Owns its RNG so evaluation stays `Send` for hosts that keep the trigger
/// system behind a mutex.
pub struct TriggerEngine {
    settings: Settings,
    rng: StdRng,
}

impl TriggerEngine {
    /// Create an engine with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            rng: StdRng::from_entropy(),
        }
    }

    /// The engine's runtime settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Evaluate one event against every non-completed action
    ///
    /// Actions are independent: several can fire on the same event. Within
    /// an action, only the first matching rule is rolled. Fired actions are
    /// marked completed so they never fire again.
    pub fn handle_event(
        &mut self,
        event: &GameEvent,
        config: &ActionConfig,
        completed: &mut CompletedActions,
    ) -> Vec<HostAction> {
        let value = event.value();
        if value.trim().is_empty() {
            return Vec::new();
        }

        let trigger_type = event.trigger_type();
        let mut out = Vec::new();

        for (action_id, action) in config.actions() {
            if completed.contains(action_id) {
                continue;
            }

            let Some(rule) = matcher::first_matching_rule(&action.triggers, trigger_type, value)
            else {
                continue;
            };

            // [0, 1) roll: probability 0 never fires, probability 1 always does
            let roll: f32 = self.rng.gen();
            if roll < rule.probability {
                log::info!(
                    "action '{}' fired on {} \"{}\" for {}",
                    action_id,
                    trigger_type,
                    value,
                    event.player().name
                );
                self.expand_effects(action, event, &mut out);
                completed.mark_completed(action_id);
            } else if let Some(fail_message) = action
                .fail_message
                .as_deref()
                .filter(|message| !message.is_empty())
            {
                out.push(HostAction::Broadcast {
                    message: fail_message.to_string(),
                });
            }
        }

        out
    }

    /// Expand a fired action's effects, in config order, into host actions
    ///
    /// A malformed effect is logged and skipped; the rest still run.
    fn expand_effects(
        &mut self,
        action: &ActionDefinition,
        event: &GameEvent,
        out: &mut Vec<HostAction>,
    ) {
        let player = event.player();

        for effect in &action.effects {
            match self.expand_effect(effect.kind, &effect.value, player) {
                Some(host_action) => out.push(host_action),
                None => {
                    log::error!(
                        "failed to expand {} effect with value \"{}\"",
                        effect.kind,
                        effect.value
                    );
                }
            }
        }

        if self.settings.announce_triggers {
            out.push(HostAction::Broadcast {
                message: self
                    .settings
                    .format_announcement(&player.name, event.trigger_type()),
            });
        }
    }

    fn expand_effect(
        &self,
        kind: EffectKind,
        value: &str,
        player: &PlayerRef,
    ) -> Option<HostAction> {
        match kind {
            EffectKind::Command => {
                let command = self.settings.substitute_player(value, &player.name);
                if command.trim().is_empty() {
                    return None;
                }
                log::info!("queueing command: {}", command);
                Some(HostAction::RunCommand { command })
            }
            EffectKind::Message => Some(HostAction::Broadcast {
                message: value.to_string(),
            }),
            EffectKind::Item => {
                if value.trim().is_empty() {
                    return None;
                }
                Some(HostAction::GiveItem {
                    player: player.id,
                    item_id: value.to_string(),
                })
            }
            EffectKind::Effect => StatusSpec::parse(
                value,
                self.settings.default_status_duration,
                self.settings.default_status_amplifier,
            )
            .map(|status| HostAction::ApplyStatus {
                player: player.id,
                status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> ActionConfig {
        ActionConfig::from_json_str(json).unwrap()
    }

    fn mob_kill(mob_id: &str) -> GameEvent {
        GameEvent::MobKilled {
            player: PlayerRef::new(1, "Steve"),
            mob_id: mob_id.to_string(),
        }
    }

    fn quiet_engine() -> TriggerEngine {
        TriggerEngine::new(Settings::quiet_preset())
    }

    const CERTAIN_ACTION: &str = r#"{
        "warden_slain": {
            "triggers": [{ "type": "MOB", "probability": 1.0, "keywords": ["warden"] }],
            "effects": [
                { "type": "MESSAGE", "value": "the deep stirs" },
                { "type": "COMMAND", "value": "give @p minecraft:sculk 1" },
                { "type": "ITEM", "value": "minecraft:echo_shard" },
                { "type": "EFFECT", "value": "minecraft:darkness:400:1" }
            ]
        }
    }"#;

    #[test]
    fn test_certain_action_fires_in_effect_order() {
        let config = config(CERTAIN_ACTION);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        let actions = engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);

        assert_eq!(actions.len(), 4);
        assert_eq!(
            actions[0],
            HostAction::Broadcast {
                message: "the deep stirs".to_string()
            }
        );
        assert_eq!(
            actions[1],
            HostAction::RunCommand {
                command: "give Steve minecraft:sculk 1".to_string()
            }
        );
        assert!(matches!(&actions[2], HostAction::GiveItem { item_id, .. }
            if item_id == "minecraft:echo_shard"));
        assert!(matches!(&actions[3], HostAction::ApplyStatus { status, .. }
            if status.effect_id == "minecraft:darkness"
                && status.duration_ticks == 400
                && status.amplifier == 1));
    }

    #[test]
    fn test_completed_action_never_refires() {
        let config = config(CERTAIN_ACTION);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        let first = engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);
        assert!(!first.is_empty());
        assert!(completed.contains("warden_slain"));

        let second = engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);
        assert!(second.is_empty());
    }

    #[test]
    fn test_zero_probability_never_fires() {
        let json = r#"{
            "never": {
                "triggers": [{ "type": "MOB", "probability": 0.0, "keywords": ["warden"] }],
                "effects": [{ "type": "MESSAGE", "value": "unreachable" }]
            }
        }"#;
        let config = config(json);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        for _ in 0..200 {
            let actions =
                engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);
            assert!(actions.is_empty());
        }
        assert!(!completed.contains("never"));
    }

    #[test]
    fn test_fail_message_broadcast_on_lost_roll() {
        let json = r#"{
            "never": {
                "triggers": [{ "type": "MOB", "probability": 0.0, "keywords": ["warden"] }],
                "effects": [{ "type": "MESSAGE", "value": "unreachable" }],
                "fail_message": "it slips away"
            }
        }"#;
        let config = config(json);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        let actions = engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);
        assert_eq!(
            actions,
            vec![HostAction::Broadcast {
                message: "it slips away".to_string()
            }]
        );
        // A lost roll does not complete the action
        assert!(!completed.contains("never"));
    }

    #[test]
    fn test_value_match_is_case_insensitive() {
        let config = config(CERTAIN_ACTION);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        let actions = engine.handle_event(&mob_kill("MINECRAFT:WARDEN"), &config, &mut completed);
        assert!(!actions.is_empty());
    }

    #[test]
    fn test_unmatched_type_does_nothing() {
        let config = config(CERTAIN_ACTION);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        let event = GameEvent::BiomeEntered {
            player: PlayerRef::new(1, "Steve"),
            biome: "minecraft:warden".to_string(),
        };
        assert!(engine.handle_event(&event, &config, &mut completed).is_empty());
    }

    #[test]
    fn test_blank_event_value_ignored() {
        let config = config(CERTAIN_ACTION);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        assert!(engine.handle_event(&mob_kill("   "), &config, &mut completed).is_empty());
    }

    #[test]
    fn test_multiple_actions_fire_on_one_event() {
        let json = r#"{
            "a": {
                "triggers": [{ "type": "MOB", "probability": 1.0, "keywords": ["warden"] }],
                "effects": [{ "type": "MESSAGE", "value": "first" }]
            },
            "b": {
                "triggers": [{ "type": "MOB", "probability": 1.0, "keywords": ["warden"] }],
                "effects": [{ "type": "MESSAGE", "value": "second" }]
            }
        }"#;
        let config = config(json);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        let actions = engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);
        assert_eq!(actions.len(), 2);
        assert!(completed.contains("a"));
        assert!(completed.contains("b"));
    }

    #[test]
    fn test_malformed_status_effect_skipped() {
        let json = r#"{
            "a": {
                "triggers": [{ "type": "MOB", "probability": 1.0, "keywords": ["warden"] }],
                "effects": [
                    { "type": "EFFECT", "value": "not_a_status" },
                    { "type": "MESSAGE", "value": "still runs" }
                ]
            }
        }"#;
        let config = config(json);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        let actions = engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);
        assert_eq!(
            actions,
            vec![HostAction::Broadcast {
                message: "still runs".to_string()
            }]
        );
    }

    #[test]
    fn test_announcement_appended_when_enabled() {
        let config = config(CERTAIN_ACTION);
        let mut completed = CompletedActions::new();
        let mut engine = TriggerEngine::new(Settings::default());

        let actions = engine.handle_event(&mob_kill("minecraft:warden"), &config, &mut completed);

        let Some(HostAction::Broadcast { message }) = actions.last() else {
            panic!("expected trailing announcement broadcast");
        };
        assert!(message.contains("Steve"));
        assert!(message.contains("MOB"));
    }

    #[test]
    fn test_item_use_matches_item_rules() {
        let json = r#"{
            "echo": {
                "triggers": [{ "type": "ITEM", "probability": 1.0, "keywords": ["echo_shard"] }],
                "effects": [{ "type": "MESSAGE", "value": "hum" }]
            }
        }"#;
        let config = config(json);
        let mut completed = CompletedActions::new();
        let mut engine = quiet_engine();

        // Right-click use feeds the same ITEM rules as pickup
        let used = GameEvent::ItemUsed {
            player: PlayerRef::new(1, "Steve"),
            item_id: "minecraft:echo_shard".to_string(),
        };
        assert!(!engine.handle_event(&used, &config, &mut completed).is_empty());
        assert!(completed.contains("echo"));
    }
}
