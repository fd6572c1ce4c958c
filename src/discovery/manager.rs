//! Discovery manager
//!
//! Indexes the host's item registry into the configured groups so lookups
//! during play are just map reads.

use std::collections::HashMap;

use crate::config::TriggerType;

use super::config::{DiscoveryConfig, ItemGroup};

/// The host's item registry, as `namespace:path` ids supplied at startup
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<String>,
}

impl ItemCatalog {
    /// Build a catalog from registry ids
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// All item ids
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Split an id into (namespace, path); ids without a namespace get ""
    pub fn split_id(item_id: &str) -> (&str, &str) {
        match item_id.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => ("", item_id),
        }
    }
}

/// Resolves which items belong to which groups
#[derive(Debug)]
pub struct DiscoveryManager {
    config: DiscoveryConfig,
    items_by_group: HashMap<String, Vec<String>>,
}

impl DiscoveryManager {
    /// Build the manager, indexing the catalog against the configured groups
    pub fn new(config: DiscoveryConfig, catalog: &ItemCatalog) -> Self {
        let mut items_by_group: HashMap<String, Vec<String>> = HashMap::new();

        for item_id in catalog.items() {
            for group in config.groups() {
                if Self::item_in_group(group, item_id) {
                    items_by_group
                        .entry(group.name.clone())
                        .or_default()
                        .push(item_id.clone());
                }
            }
        }

        log::info!("indexed items for {} groups", items_by_group.len());
        Self {
            config,
            items_by_group,
        }
    }

    /// Whether an item belongs to a group: namespace equality, or the item
    /// path case-insensitively contains one of the group's keywords.
    pub fn item_in_group(group: &ItemGroup, item_id: &str) -> bool {
        let (namespace, path) = ItemCatalog::split_id(item_id);

        if group.namespaces.iter().any(|ns| ns == namespace) {
            return true;
        }

        let path = path.to_lowercase();
        group
            .keywords
            .iter()
            .any(|keyword| path.contains(&keyword.to_lowercase()))
    }

    /// Groups revealed by the given trigger (equality on type and value)
    pub fn groups_for_trigger(&self, trigger_type: TriggerType, value: &str) -> Vec<&ItemGroup> {
        self.config
            .groups()
            .iter()
            .filter(|group| group.trigger_type == trigger_type && group.trigger_value == value)
            .collect()
    }

    /// The indexed items of a group
    pub fn items_in_group(&self, group_name: &str) -> &[String] {
        self.items_by_group
            .get(group_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a group has been discovered
    pub fn is_discovered(&self, group_name: &str) -> bool {
        self.config.is_discovered(group_name)
    }

    /// Record a group as discovered
    pub fn mark_discovered(&mut self, group_name: &str) {
        self.config.mark_discovered(group_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> ItemGroup {
        ItemGroup {
            name: "Echoes of the Deep".to_string(),
            trigger_type: TriggerType::Biome,
            trigger_value: "minecraft:deep_dark".to_string(),
            keywords: vec!["sculk".to_string(), "echo".to_string()],
            namespaces: vec!["deeper_dark".to_string()],
        }
    }

    fn sample_catalog() -> ItemCatalog {
        ItemCatalog::new(vec![
            "minecraft:sculk_sensor".to_string(),
            "minecraft:echo_shard".to_string(),
            "minecraft:dirt".to_string(),
            "deeper_dark:gloom_idol".to_string(),
        ])
    }

    #[test]
    fn test_item_in_group_by_keyword() {
        let group = sample_group();
        assert!(DiscoveryManager::item_in_group(&group, "minecraft:sculk_sensor"));
        assert!(DiscoveryManager::item_in_group(&group, "minecraft:ECHO_SHARD"));
        assert!(!DiscoveryManager::item_in_group(&group, "minecraft:dirt"));
    }

    #[test]
    fn test_item_in_group_by_namespace() {
        let group = sample_group();
        // No keyword match, namespace carries it
        assert!(DiscoveryManager::item_in_group(&group, "deeper_dark:gloom_idol"));
    }

    #[test]
    fn test_indexing() {
        let config = DiscoveryConfig::from_groups(vec![sample_group()]);
        let manager = DiscoveryManager::new(config, &sample_catalog());

        let items = manager.items_in_group("Echoes of the Deep");
        assert_eq!(items.len(), 3);
        assert!(!items.contains(&"minecraft:dirt".to_string()));
        assert!(manager.items_in_group("No Such Group").is_empty());
    }

    #[test]
    fn test_groups_for_trigger_is_exact() {
        let config = DiscoveryConfig::from_groups(vec![sample_group()]);
        let manager = DiscoveryManager::new(config, &sample_catalog());

        assert_eq!(
            manager
                .groups_for_trigger(TriggerType::Biome, "minecraft:deep_dark")
                .len(),
            1
        );
        // Substring is not enough here, unlike trigger keywords
        assert!(manager
            .groups_for_trigger(TriggerType::Biome, "deep_dark")
            .is_empty());
        assert!(manager
            .groups_for_trigger(TriggerType::Item, "minecraft:deep_dark")
            .is_empty());
    }

    #[test]
    fn test_discovery_marking() {
        let config = DiscoveryConfig::from_groups(vec![sample_group()]);
        let mut manager = DiscoveryManager::new(config, &sample_catalog());

        assert!(!manager.is_discovered("Echoes of the Deep"));
        manager.mark_discovered("Echoes of the Deep");
        assert!(manager.is_discovered("Echoes of the Deep"));
    }
}
