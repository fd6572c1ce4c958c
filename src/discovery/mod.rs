//! Item-group discovery
//!
//! Groups related items (by namespace or path keyword) so triggers can
//! reveal themed collections to players as they are discovered.

pub mod config;
pub mod manager;

pub use config::{DiscoveryConfig, ItemGroup};
pub use manager::{DiscoveryManager, ItemCatalog};
