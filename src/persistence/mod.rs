//! Completed-action persistence
//!
//! One-shot actions are remembered across restarts in a flat JSON file
//! inside the world save. The set only ever grows during a session.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name inside the world save's `data` directory
pub const COMPLETED_FILE: &str = "completed_actions.json";

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to access completed-actions file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse completed-actions file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The set of action ids that have already fired
///
/// When bound to a world save, every newly completed action is written
/// through immediately. An unbound set (before a world is attached, or in
/// tests) works purely in memory.
#[derive(Debug, Default)]
pub struct CompletedActions {
    completed: HashSet<String>,
    save_path: Option<PathBuf>,
}

impl CompletedActions {
    /// Create an empty, in-memory set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a world save root, loading any previously persisted set
    ///
    /// A missing file just means nothing has completed yet. A corrupt file
    /// is logged and treated as empty rather than blocking startup.
    pub fn attach(save_root: &Path) -> Self {
        let save_path = save_root.join("data").join(COMPLETED_FILE);

        let completed = match Self::load(&save_path) {
            Ok(set) => set,
            Err(e) => {
                log::error!(
                    "failed to load completed actions from {}: {}",
                    save_path.display(),
                    e
                );
                HashSet::new()
            }
        };

        Self {
            completed,
            save_path: Some(save_path),
        }
    }

    /// Whether an action has already fired
    pub fn contains(&self, action_id: &str) -> bool {
        self.completed.contains(action_id)
    }

    /// Record an action as fired, persisting immediately if newly inserted
    pub fn mark_completed(&mut self, action_id: &str) {
        if self.completed.insert(action_id.to_string()) {
            if let Err(e) = self.save() {
                log::error!("failed to save completed actions: {}", e);
            }
        }
    }

    /// Number of completed actions
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// Whether no actions have completed
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    fn load(path: &Path) -> Result<HashSet<String>, PersistenceError> {
        if !path.exists() {
            return Ok(HashSet::new());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.save_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Sorted output keeps the file diff-friendly for server admins
        let mut ids: Vec<&str> = self.completed.iter().map(String::as_str).collect();
        ids.sort_unstable();

        let json = serde_json::to_string_pretty(&ids)?;
        fs::write(path, json)?;
        Ok(())
    }
}
