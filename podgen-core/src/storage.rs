//! Persistent key-value storage boundary
//!
//! The project collection and the active project id are the only two keys in
//! the shared key space, and the project store is their exclusive writer.
//! Write failures are logged and swallowed: the in-memory state stays
//! authoritative and the next save gets another chance.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key under which the serialized project collection lives
pub const PROJECTS_KEY: &str = "podgen_projects";

/// Key under which the active project id lives
pub const ACTIVE_PROJECT_KEY: &str = "podgen_current_project";

/// Process-wide key-value store that survives restarts
pub trait StateStore: Send {
    /// Read the value for a key, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write the value for a key
    fn set(&self, key: &str, value: &str);
}

// ============================================================================
// FILE-BACKED STORE
// ============================================================================

/// File-backed store keeping one JSON file per key under the user's
/// config directory (`<config_dir>/podgen/<key>.json`).
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at the platform config directory.
    ///
    /// Returns `None` when the config directory cannot be determined; callers
    /// are expected to fall back to an in-memory store.
    pub fn new() -> Option<Self> {
        let mut dir = dirs::config_dir()?;
        dir.push("podgen");
        Some(Self { dir })
    }

    /// Create a store rooted at an explicit directory (used by tests)
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if !self.dir.exists() {
            if let Err(e) = fs::create_dir_all(&self.dir) {
                log::warn!("Failed to create storage directory: {}", e);
                return;
            }
        }

        let path = self.path_for(key);
        if let Err(e) = fs::write(&path, value) {
            log::warn!("Failed to write {}: {}", path.display(), e);
        } else {
            log::debug!("Saved {} ({} bytes)", path.display(), value.len());
        }
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// In-memory store for tests and embedders without a filesystem.
///
/// Raw values can be pre-seeded, which is how tests exercise the corrupt
/// storage recovery path.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value before bootstrap
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStateStore::new();
        assert_eq!(store.get(PROJECTS_KEY), None);

        store.set(PROJECTS_KEY, "[]");
        assert_eq!(store.get(PROJECTS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("podgen_store_{}", uuid::Uuid::new_v4()));
        let store = FileStateStore::with_dir(&dir);

        assert_eq!(store.get(ACTIVE_PROJECT_KEY), None);

        store.set(ACTIVE_PROJECT_KEY, "project-1");
        assert_eq!(store.get(ACTIVE_PROJECT_KEY).as_deref(), Some("project-1"));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }
}
