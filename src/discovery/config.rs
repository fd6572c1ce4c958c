//! Discovery configuration
//!
//! Loads item-group definitions and the set of group names players have
//! already discovered. Discovered names are written back to the same file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ConfigError, TriggerType};

/// A themed group of items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroup {
    /// Group name shown to players
    pub name: String,
    /// Trigger type this group is revealed by
    pub trigger_type: TriggerType,
    /// Exact trigger value this group is revealed by
    pub trigger_value: String,
    /// Path keywords that place an item in this group
    pub keywords: Vec<String>,
    /// Namespaces whose items all belong to this group
    pub namespaces: Vec<String>,
}

/// Item groups plus the persisted set of discovered group names
#[derive(Debug, Default)]
pub struct DiscoveryConfig {
    groups: Vec<ItemGroup>,
    discovered: HashSet<String>,
    path: Option<PathBuf>,
}

impl DiscoveryConfig {
    /// Create an in-memory config from a list of groups
    pub fn from_groups(groups: Vec<ItemGroup>) -> Self {
        Self {
            groups,
            discovered: HashSet::new(),
            path: None,
        }
    }

    /// Load from `path`, writing the built-in defaults there first if the
    /// file does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let mut defaults = Self::default_groups();
            defaults.path = Some(path.to_path_buf());
            defaults.save()?;
            log::info!("created default discovery config at {}", path.display());
            return Ok(defaults);
        }

        let json = fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&json)?;
        let object = root.as_object().ok_or(ConfigError::NotAnObject)?;

        let mut config = Self {
            path: Some(path.to_path_buf()),
            ..Self::default()
        };

        if let Some(Value::Array(names)) = object.get("discovered_item_groups") {
            config.discovered = names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }

        if let Some(Value::Array(groups)) = object.get("item_groups") {
            for entry in groups {
                match serde_json::from_value::<ItemGroup>(entry.clone()) {
                    Ok(group) => config.groups.push(group),
                    Err(e) => log::error!("failed to parse item group: {}", e),
                }
            }
        }

        log::info!(
            "loaded {} item groups and {} discovered groups",
            config.groups.len(),
            config.discovered.len()
        );
        Ok(config)
    }

    /// Write groups and discovered names back to the bound file
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut discovered: Vec<&str> = self.discovered.iter().map(String::as_str).collect();
        discovered.sort_unstable();

        let root = serde_json::json!({
            "discovered_item_groups": discovered,
            "item_groups": self.groups,
        });
        fs::write(path, serde_json::to_string_pretty(&root)?)?;
        Ok(())
    }

    /// Built-in default groups, written on first run
    pub fn default_groups() -> Self {
        Self::from_groups(vec![ItemGroup {
            name: "Echoes of the Deep".to_string(),
            trigger_type: TriggerType::Biome,
            trigger_value: "minecraft:deep_dark".to_string(),
            keywords: vec!["sculk".to_string(), "echo".to_string()],
            namespaces: Vec::new(),
        }])
    }

    /// All configured groups
    pub fn groups(&self) -> &[ItemGroup] {
        &self.groups
    }

    /// Whether a group has been discovered
    pub fn is_discovered(&self, group_name: &str) -> bool {
        self.discovered.contains(group_name)
    }

    /// Record a group as discovered, persisting if newly inserted
    pub fn mark_discovered(&mut self, group_name: &str) {
        if self.discovered.insert(group_name.to_string()) {
            if let Err(e) = self.save() {
                log::error!("failed to save discovery config: {}", e);
            }
        }
    }

    /// Names of all discovered groups
    pub fn discovered(&self) -> &HashSet<String> {
        &self.discovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "discovered_item_groups": ["Echoes of the Deep"],
        "item_groups": [
            {
                "name": "Echoes of the Deep",
                "triggerType": "biome",
                "triggerValue": "minecraft:deep_dark",
                "keywords": ["sculk"],
                "namespaces": []
            },
            { "name": "broken entry" }
        ]
    }"#;

    #[test]
    fn test_load_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discovery.json");
        fs::write(&path, SAMPLE).unwrap();

        let config = DiscoveryConfig::load_or_create(&path).unwrap();
        // Broken entry is skipped, good one survives
        assert_eq!(config.groups().len(), 1);
        assert_eq!(config.groups()[0].trigger_type, TriggerType::Biome);
        assert!(config.is_discovered("Echoes of the Deep"));
    }

    #[test]
    fn test_creates_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("discovery.json");

        let config = DiscoveryConfig::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert!(!config.groups().is_empty());
    }

    #[test]
    fn test_mark_discovered_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discovery.json");

        let mut config = DiscoveryConfig::load_or_create(&path).unwrap();
        config.mark_discovered("Echoes of the Deep");

        let reloaded = DiscoveryConfig::load_or_create(&path).unwrap();
        assert!(reloaded.is_discovered("Echoes of the Deep"));
        assert!(!reloaded.is_discovered("Something Else"));
    }
}
