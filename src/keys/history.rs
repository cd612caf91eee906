//! KeyHistory - persistent store of previously validated keys.
//!
//! A flat JSON file mapping raw key to the model it unlocked and when it was
//! last used. Lets an operator reuse validated keys across sessions; not
//! required for correctness of a single batch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted history record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The model this key unlocked at validation time.
    pub model: String,
    /// When the key was last validated or used.
    pub last_used: DateTime<Utc>,
}

/// Persistent key history backed by a JSON file.
pub struct KeyHistory {
    path: PathBuf,
}

impl KeyHistory {
    /// Create a KeyHistory at the given file path. Does not touch the disk.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a KeyHistory at the default location.
    /// Default: ~/.cache/vidgen/keys.json
    pub fn with_default_path() -> Self {
        let path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("vidgen")
            .join("keys.json");
        Self::new(path)
    }

    /// Load the full mapping. A missing file is an empty history.
    pub fn load(&self) -> Result<BTreeMap<String, HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Record a key as validated now, creating parent directories as needed.
    pub fn record(&self, key: &str, model: &str) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.insert(
            key.to_string(),
            HistoryEntry {
                model: model.to_string(),
                last_used: Utc::now(),
            },
        );
        self.save(&entries)
    }

    /// Overwrite the file with the given mapping.
    pub fn save(&self, entries: &BTreeMap<String, HistoryEntry>) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Delete the history file. Deleting an absent file is not an error.
    pub fn delete(&self) -> Result<(), HistoryError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Errors from the history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt history file: {0}")]
    Parse(#[from] serde_json::Error),
}
