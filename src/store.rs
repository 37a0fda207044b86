// Persisted store adapter for the task collection
// One JSON entry under a fixed key, read once at startup and
// overwritten wholesale on every save

use crate::config::Config;
use crate::tasks::Task;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Fixed key the task collection is stored under
pub const STORE_KEY: &str = "to-do-list";

/// File-backed key-value entry holding the serialized collection
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Adapter for the collection entry inside the configured data dir
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.entry_file(STORE_KEY),
        }
    }

    /// Path of the backing entry
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the previously persisted collection.
    /// A missing entry, an unreadable file, or a malformed blob all
    /// count as no prior state and yield an empty collection.
    pub fn load(&self) -> Vec<Task> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };

        if contents.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&contents) {
            Ok(tasks) => tasks,
            Err(err) => {
                eprintln!(
                    "Ignoring malformed task store at {}: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Serialize the full collection and overwrite the entry, holding
    /// an exclusive lock for the duration of the write
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| {
                format!(
                    "Failed to open store entry for writing: {}",
                    self.path.display()
                )
            })?;

        file.lock_exclusive()
            .with_context(|| "Failed to acquire exclusive lock on store entry")?;

        let contents =
            serde_json::to_string(tasks).with_context(|| "Failed to serialize task collection")?;

        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write store entry: {}", self.path.display()))?;

        // Lock is released when the file handle drops
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().to_path_buf());
        (TaskStore::new(&config), temp_dir)
    }

    #[test]
    fn test_missing_entry_loads_empty() {
        let (store, _temp) = test_store();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_order_content_and_state() {
        let (store, _temp) = test_store();

        let mut second = Task::new(1, "write tests");
        second.completed = true;
        let tasks = vec![Task::new(0, "buy milk"), second];

        store.save(&tasks).unwrap();
        let loaded = store.load();

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_single_task_roundtrip() {
        let (store, _temp) = test_store();

        let tasks = vec![Task::new(0, "buy milk")];
        store.save(&tasks).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].index, 0);
        assert_eq!(loaded[0].description, "buy milk");
        assert!(!loaded[0].completed);
    }

    #[test]
    fn test_malformed_entry_loads_empty() {
        let (store, _temp) = test_store();

        fs::write(store.path(), "{ not json ]").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let (store, _temp) = test_store();

        fs::write(store.path(), r#"{"index":0}"#).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let (store, _temp) = test_store();

        fs::write(store.path(), "").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_creates_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().join("nested").join("state"));
        let store = TaskStore::new(&config);

        store.save(&[Task::new(0, "first")]).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let (store, _temp) = test_store();

        store
            .save(&[Task::new(0, "a"), Task::new(1, "b")])
            .unwrap();
        store.save(&[Task::new(0, "only")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description, "only");
    }

    #[test]
    fn test_tombstones_are_not_persisted() {
        let (store, _temp) = test_store();

        let mut task = Task::new(0, "ghost");
        task.removed = true;
        store.save(&[task]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(!loaded[0].removed);
    }
}
