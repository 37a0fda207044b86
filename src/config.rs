// Data directory configuration
// Resolves where the persisted store lives, with an env override so
// tests and scripts can redirect state to another directory

use std::path::PathBuf;

/// Environment variable overriding the data directory wholesale
pub const DATA_DIR_ENV: &str = "TODO_LIST_DIR";

/// Locations for persisted list state
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the key-value entries
    pub data_dir: PathBuf,
}

impl Config {
    /// Configuration rooted at an explicit directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        if let Ok(override_dir) = std::env::var(DATA_DIR_ENV) {
            return Self::new(PathBuf::from(override_dir));
        }

        Self::default_paths()
    }

    /// Default data directory: ~/.to-do-list, or a tmp path when no
    /// home directory is available
    pub fn default_paths() -> Self {
        let data_dir = dirs::home_dir()
            .map(|home| home.join(".to-do-list"))
            .unwrap_or_else(|| PathBuf::from("/tmp/to-do-list"));

        Self::new(data_dir)
    }

    /// File path of the entry stored under `key`
    pub fn entry_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}
