//! Event Warden CLI - testing and development entry point
//!
//! Dry-runs the trigger configuration against a few sample events without
//! requiring a host server.

use event_warden::config::{ActionConfig, Settings};
use event_warden::event::{GameEvent, PlayerRef};
use event_warden::Warden;

fn main() {
    println!("Event Warden - config-driven event triggers");
    println!("===========================================");
    println!();

    let actions = ActionConfig::default_actions();
    println!("Loaded {} built-in actions:", actions.len());
    for (action_id, action) in actions.actions() {
        println!(
            "  - {} ({} triggers, {} effects)",
            action_id,
            action.triggers.len(),
            action.effects.len()
        );
    }
    println!();

    let mut warden = Warden::new(Settings::default(), actions);
    let player = PlayerRef::new(1, "Steve");

    let samples = vec![
        GameEvent::BiomeEntered {
            player: player.clone(),
            biome: "minecraft:deep_dark".to_string(),
        },
        GameEvent::ItemPickedUp {
            player: player.clone(),
            item_id: "minecraft:echo_shard".to_string(),
        },
        GameEvent::MobKilled {
            player,
            mob_id: "minecraft:warden".to_string(),
        },
    ];

    println!("Dry run:");
    for event in &samples {
        println!("  event: {} \"{}\"", event.trigger_type(), event.value());
        for action in warden.handle_event(event) {
            println!("    -> {:?}", action);
        }
    }
}
