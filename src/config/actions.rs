//! Action configuration
//!
//! Defines the trigger/effect data model and loads it from the server's
//! JSON config file. Actions are immutable once loaded.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Kind of game event a trigger listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerType {
    /// Player entered a biome
    Biome,
    /// Player picked up or used an item
    Item,
    /// Player killed a mob
    Mob,
    /// Player received a status effect
    Effect,
    /// Player earned an advancement
    Advancement,
    /// Player changed dimension
    Dimension,
}

impl TriggerType {
    /// Config-file spelling of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Biome => "BIOME",
            TriggerType::Item => "ITEM",
            TriggerType::Mob => "MOB",
            TriggerType::Effect => "EFFECT",
            TriggerType::Advancement => "ADVANCEMENT",
            TriggerType::Dimension => "DIMENSION",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BIOME" => Ok(TriggerType::Biome),
            "ITEM" => Ok(TriggerType::Item),
            "MOB" => Ok(TriggerType::Mob),
            "EFFECT" => Ok(TriggerType::Effect),
            "ADVANCEMENT" => Ok(TriggerType::Advancement),
            "DIMENSION" => Ok(TriggerType::Dimension),
            other => Err(format!("unknown trigger type: {}", other)),
        }
    }
}

// Config files historically use any casing for type names, so deserialize
// through FromStr instead of the derived uppercase-only representation.
impl<'de> Deserialize<'de> for TriggerType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for TriggerType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Kind of side effect an action executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Run a server command at full permission
    Command,
    /// Broadcast a chat message to all players
    Message,
    /// Give an item to the triggering player
    Item,
    /// Apply a status effect to the triggering player
    Effect,
}

impl EffectKind {
    /// Config-file spelling of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Command => "COMMAND",
            EffectKind::Message => "MESSAGE",
            EffectKind::Item => "ITEM",
            EffectKind::Effect => "EFFECT",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COMMAND" => Ok(EffectKind::Command),
            "MESSAGE" => Ok(EffectKind::Message),
            "ITEM" => Ok(EffectKind::Item),
            "EFFECT" => Ok(EffectKind::Effect),
            other => Err(format!("unknown effect kind: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for EffectKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for EffectKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A configured trigger condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRule {
    /// Event kind this rule listens for
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    /// Chance in [0, 1] that a keyword match fires the action
    pub probability: f32,
    /// Lowercased substrings matched against the event value
    pub keywords: Vec<String>,
}

/// A configured side effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    /// What to do
    #[serde(rename = "type")]
    pub kind: EffectKind,
    /// Kind-specific payload (command line, message text, item id, status spec)
    pub value: String,
}

/// A named bundle of triggers and effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Rules that can fire this action
    pub triggers: Vec<TriggerRule>,
    /// Effects executed in order when the action fires
    pub effects: Vec<Effect>,
    /// Broadcast when a matched rule loses its probability roll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_message: Option<String>,
}

/// Action configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config root must be a JSON object")]
    NotAnObject,
}

/// All configured actions, keyed by action id
///
/// Iteration order is stable (sorted by id) so evaluation is deterministic
/// across runs.
#[derive(Debug, Clone, Default)]
pub struct ActionConfig {
    actions: BTreeMap<String, ActionDefinition>,
}

impl ActionConfig {
    /// Load actions from `path`, writing the built-in defaults there first
    /// if the file does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let defaults = Self::default_actions();
            defaults.write(path)?;
            log::info!("created default action config at {}", path.display());
            return Ok(defaults);
        }

        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded {} actions from {}", config.len(), path.display());
        Ok(config)
    }

    /// Parse actions from a JSON string
    ///
    /// Parsing is lenient: a malformed trigger, effect, or action is logged
    /// and skipped, and the rest of the file still loads.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_json::from_str(json)?;
        let object = root.as_object().ok_or(ConfigError::NotAnObject)?;

        let mut actions = BTreeMap::new();
        for (action_id, entry) in object {
            match parse_action(action_id, entry) {
                Some(action) => {
                    actions.insert(action_id.clone(), action);
                }
                None => {
                    log::error!("skipping malformed action '{}'", action_id);
                }
            }
        }

        Ok(Self { actions })
    }

    /// Serialize all actions to `path` as pretty-printed JSON
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.actions)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Built-in default actions, written on first run
    pub fn default_actions() -> Self {
        let mut actions = BTreeMap::new();

        actions.insert(
            "deep_dark_whisper".to_string(),
            ActionDefinition {
                triggers: vec![TriggerRule {
                    trigger_type: TriggerType::Biome,
                    probability: 0.35,
                    keywords: vec!["deep_dark".to_string()],
                }],
                effects: vec![
                    Effect {
                        kind: EffectKind::Message,
                        value: "§7A chill runs through the earth beneath you...".to_string(),
                    },
                    Effect {
                        kind: EffectKind::Command,
                        value: "playsound minecraft:ambient.cave ambient @p".to_string(),
                    },
                ],
                fail_message: None,
            },
        );

        actions.insert(
            "first_echo".to_string(),
            ActionDefinition {
                triggers: vec![TriggerRule {
                    trigger_type: TriggerType::Item,
                    probability: 1.0,
                    keywords: vec!["echo_shard".to_string()],
                }],
                effects: vec![
                    Effect {
                        kind: EffectKind::Message,
                        value: "§bThe shard hums with a distant heartbeat.".to_string(),
                    },
                    Effect {
                        kind: EffectKind::Item,
                        value: "minecraft:sculk".to_string(),
                    },
                ],
                fail_message: None,
            },
        );

        actions.insert(
            "slayer_of_the_deep".to_string(),
            ActionDefinition {
                triggers: vec![TriggerRule {
                    trigger_type: TriggerType::Mob,
                    probability: 0.5,
                    keywords: vec!["warden".to_string()],
                }],
                effects: vec![
                    Effect {
                        kind: EffectKind::Effect,
                        value: "minecraft:darkness:400:1".to_string(),
                    },
                    Effect {
                        kind: EffectKind::Message,
                        value: "§5The deep remembers what you have done.".to_string(),
                    },
                ],
                fail_message: Some("The darkness recedes... for now.".to_string()),
            },
        );

        Self { actions }
    }

    /// Iterate all actions in sorted id order
    pub fn actions(&self) -> impl Iterator<Item = (&str, &ActionDefinition)> {
        self.actions.iter().map(|(id, action)| (id.as_str(), action))
    }

    /// Look up a single action by id
    pub fn get(&self, action_id: &str) -> Option<&ActionDefinition> {
        self.actions.get(action_id)
    }

    /// Number of configured actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no actions are configured
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Parse one action entry, salvaging whatever parts are well-formed
fn parse_action(action_id: &str, entry: &Value) -> Option<ActionDefinition> {
    let object = entry.as_object()?;

    let triggers = parse_elements::<TriggerRule>(action_id, object.get("triggers"), "trigger")
        .into_iter()
        .map(sanitize_rule)
        .collect::<Vec<_>>();
    let effects = parse_elements::<Effect>(action_id, object.get("effects"), "effect");

    let fail_message = object
        .get("fail_message")
        .and_then(Value::as_str)
        .map(str::to_string);

    if triggers.is_empty() {
        log::warn!("action '{}' has no usable triggers and will never fire", action_id);
    }

    Some(ActionDefinition {
        triggers,
        effects,
        fail_message,
    })
}

/// Parse an array field element by element, logging and skipping bad entries
fn parse_elements<T: serde::de::DeserializeOwned>(
    action_id: &str,
    field: Option<&Value>,
    what: &str,
) -> Vec<T> {
    let Some(Value::Array(elements)) = field else {
        return Vec::new();
    };

    let mut parsed = Vec::with_capacity(elements.len());
    for element in elements {
        match serde_json::from_value(element.clone()) {
            Ok(value) => parsed.push(value),
            Err(e) => {
                log::error!("failed to parse {} in action '{}': {}", what, action_id, e);
            }
        }
    }
    parsed
}

/// Normalize a rule at load time: lowercase keywords, drop blank ones,
/// clamp probability into [0, 1].
fn sanitize_rule(mut rule: TriggerRule) -> TriggerRule {
    rule.keywords = rule
        .keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    if !rule.probability.is_finite() {
        log::warn!("non-finite trigger probability, treating as 0");
        rule.probability = 0.0;
    } else if !(0.0..=1.0).contains(&rule.probability) {
        log::warn!(
            "trigger probability {} outside [0, 1], clamping",
            rule.probability
        );
        rule.probability = rule.probability.clamp(0.0, 1.0);
    }

    rule
}
