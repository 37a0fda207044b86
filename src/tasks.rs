// Task collection manager
// In-memory ordered collection owning all mutation, indexing, and
// filtering; the view never holds its own copy

use serde::{Deserialize, Serialize};

/// A single to-do entry as it is persisted and displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Position of the task in the collection; reassigned by `reindex`
    pub index: usize,
    /// User-entered text shown in the editable field
    pub description: String,
    /// Completion state
    pub completed: bool,
    /// Tombstone set by `mark_removed` and excised by `compact`.
    /// Not persisted; a loaded task always starts live.
    #[serde(skip)]
    pub removed: bool,
}

impl Task {
    /// Create a live, incomplete task at the given position
    pub fn new(index: usize, description: impl Into<String>) -> Self {
        Self {
            index,
            description: description.into(),
            completed: false,
            removed: false,
        }
    }
}

/// Ordered task collection; insertion order is the canonical, persisted,
/// and displayed order
#[derive(Debug, Clone, Default)]
pub struct TaskManager {
    tasks: Vec<Task>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection; used once at hydration
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// All records in order, tombstones included
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of records; counts tombstones until `compact` runs
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task at the end. The caller constructs it with an
    /// `index` equal to the current length.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the description at `position`. Empty text and
    /// out-of-range positions leave the record unchanged.
    pub fn set_description(&mut self, position: usize, description: &str) {
        if description.is_empty() {
            return;
        }
        if let Some(task) = self.tasks.get_mut(position) {
            task.description = description.to_string();
        }
    }

    /// Flip the completion state at `position`; out of range is a no-op
    pub fn toggle(&mut self, position: usize) {
        if let Some(task) = self.tasks.get_mut(position) {
            task.completed = !task.completed;
        }
    }

    /// Tombstone the record at `position` without shifting its
    /// successors; out of range is a no-op
    pub fn mark_removed(&mut self, position: usize) {
        if let Some(task) = self.tasks.get_mut(position) {
            task.removed = true;
        }
    }

    /// Excise all tombstoned records, leaving a dense sequence.
    /// Stored indices are stale until `reindex` runs.
    pub fn compact(&mut self) {
        self.tasks.retain(|task| !task.removed);
    }

    /// Eagerly delete the record at `position`, shifting its successors
    /// down by one; out of range is a no-op
    pub fn remove(&mut self, position: usize) {
        if position < self.tasks.len() {
            self.tasks.remove(position);
        }
    }

    /// Reassign every record's stored index to its actual position
    pub fn reindex(&mut self) {
        for (position, task) in self.tasks.iter_mut().enumerate() {
            task.index = position;
        }
    }

    /// True iff at least one live record is completed
    pub fn has_completed(&self) -> bool {
        self.tasks
            .iter()
            .any(|task| task.completed && !task.removed)
    }
}
