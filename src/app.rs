// Event entry points wiring the collection, store, view, and trigger
// One explicitly constructed state object; the input adapters call into
// it and never touch the collection directly

use crate::store::TaskStore;
use crate::tasks::{Task, TaskManager};
use crate::trigger::ClearTrigger;
use crate::view::{ItemHandle, ListView};
use anyhow::Result;

/// The whole list state: the collection, its persisted store, the
/// visual list mirroring it, and the bulk-clear trigger
#[derive(Debug)]
pub struct App {
    store: TaskStore,
    tasks: TaskManager,
    view: ListView,
    trigger: ClearTrigger,
}

impl App {
    /// Construct an empty list over the given store. Call `populate`
    /// before wiring any input handlers.
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            tasks: TaskManager::new(),
            view: ListView::new(),
            trigger: ClearTrigger::new(),
        }
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// True while the clear-completed control is enabled
    pub fn clear_enabled(&self) -> bool {
        self.trigger.is_enabled()
    }

    /// Hydrate the collection from the store and render every task.
    /// Runs synchronously, so hydration always finishes before any
    /// user-triggered mutation can be dispatched.
    pub fn populate(&mut self) {
        self.tasks.replace_all(self.store.load());
        for task in self.tasks.tasks() {
            self.view.render(task);
        }
        self.trigger.sync(self.tasks.has_completed());
    }

    /// Form-submit entry: append a new task at the end and persist
    pub fn create_task(&mut self, description: &str) -> Result<()> {
        let task = Task::new(self.tasks.len(), description);
        self.view.render(&task);
        self.tasks.push(task);
        self.store.save(self.tasks.tasks())
    }

    /// Click entry: move the selection to the given row
    pub fn select(&mut self, handle: ItemHandle) {
        self.view.select(handle);
    }

    /// Change entry for the editable field: commit a new description.
    /// Empty input is discarded and the prior text stays in place.
    pub fn commit_edit(&mut self, position: usize, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(id) = self.view.item_at(position).map(|item| item.id) else {
            return Ok(());
        };

        self.tasks.set_description(id, text);
        self.view.set_placeholder(position, text);
        self.store.save(self.tasks.tasks())
    }

    /// Change entry for the completion toggle: flip the task state and
    /// re-evaluate the bulk-clear trigger
    pub fn toggle(&mut self, position: usize) -> Result<()> {
        let Some(id) = self.view.item_at(position).map(|item| item.id) else {
            return Ok(());
        };

        self.tasks.toggle(id);
        let checked = self
            .tasks
            .tasks()
            .get(id)
            .map(|task| task.completed)
            .unwrap_or(false);
        self.view.set_checked(position, checked);
        self.trigger.sync(self.tasks.has_completed());
        self.store.save(self.tasks.tasks())
    }

    /// Delete-click entry: remove one task eagerly and close the gap
    pub fn remove_task(&mut self, position: usize) -> Result<()> {
        let Some(id) = self.view.item_at(position).map(|item| item.id) else {
            return Ok(());
        };

        self.tasks.remove(id);
        self.view.remove_at(position);
        self.reorder_from(id)?;
        self.trigger.sync(self.tasks.has_completed());
        Ok(())
    }

    /// Bulk-clear entry: tombstone every completed task, then excise
    /// them in one compaction pass
    pub fn clear_completed(&mut self) -> Result<()> {
        for id in self.view.checked_ids() {
            self.tasks.mark_removed(id);
        }
        self.view.remove_checked();
        self.tasks.compact();
        self.trigger.sync(self.tasks.has_completed());
        self.reorder_from(0)
    }

    /// Re-walk the rows from `start` through the end of the list,
    /// re-syncing every identifier to its collection position, then
    /// re-persist. The walk must reach the last row; a partial pass
    /// leaves identifier/position mismatches behind.
    fn reorder_from(&mut self, start: usize) -> Result<()> {
        self.tasks.reindex();
        for position in start..self.view.len() {
            self.view.set_identifier(position, position);
        }
        self.store.save(self.tasks.tasks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().to_path_buf());
        let mut app = App::new(TaskStore::new(&config));
        app.populate();
        (app, temp_dir)
    }

    #[test]
    fn test_create_task_appends_and_persists() {
        let (mut app, _temp) = test_app();

        app.create_task("buy milk").unwrap();

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks().tasks()[0].index, 0);
        assert_eq!(app.view().len(), 1);
        assert_eq!(app.view().item_at(0).unwrap().placeholder, "buy milk");
    }

    #[test]
    fn test_remove_task_reorders_surviving_positions() {
        let (mut app, _temp) = test_app();
        app.create_task("first").unwrap();
        app.create_task("second").unwrap();

        app.remove_task(0).unwrap();

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks().tasks()[0].description, "second");
        assert_eq!(app.tasks().tasks()[0].index, 0);
        assert_eq!(app.view().item_at(0).unwrap().id, 0);
    }

    #[test]
    fn test_commit_edit_updates_description_and_placeholder() {
        let (mut app, _temp) = test_app();
        app.create_task("old text").unwrap();

        app.commit_edit(0, "new text").unwrap();

        assert_eq!(app.tasks().tasks()[0].description, "new text");
        assert_eq!(app.view().item_at(0).unwrap().placeholder, "new text");
    }

    #[test]
    fn test_commit_edit_empty_is_discarded() {
        let (mut app, _temp) = test_app();
        app.create_task("keep me").unwrap();

        app.commit_edit(0, "").unwrap();

        assert_eq!(app.tasks().tasks()[0].description, "keep me");
        assert_eq!(app.view().item_at(0).unwrap().placeholder, "keep me");
    }

    #[test]
    fn test_toggle_drives_clear_trigger() {
        let (mut app, _temp) = test_app();
        app.create_task("task").unwrap();
        assert!(!app.clear_enabled());

        app.toggle(0).unwrap();
        assert!(app.clear_enabled());
        assert!(app.view().item_at(0).unwrap().checked);

        // Toggling the only completed task back disables the control
        app.toggle(0).unwrap();
        assert!(!app.clear_enabled());
        assert!(!app.view().item_at(0).unwrap().checked);
    }

    #[test]
    fn test_clear_completed_excises_all_completed_tasks() {
        let (mut app, _temp) = test_app();
        app.create_task("a").unwrap();
        app.create_task("b").unwrap();
        app.create_task("c").unwrap();
        app.toggle(0).unwrap();
        app.toggle(2).unwrap();

        app.clear_completed().unwrap();

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks().tasks()[0].description, "b");
        assert_eq!(app.tasks().tasks()[0].index, 0);
        assert!(!app.tasks().tasks()[0].completed);
        assert_eq!(app.view().len(), 1);
        assert_eq!(app.view().item_at(0).unwrap().id, 0);
        assert!(!app.clear_enabled());
    }

    #[test]
    fn test_populate_renders_persisted_tasks() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().to_path_buf());

        {
            let mut app = App::new(TaskStore::new(&config));
            app.populate();
            app.create_task("persisted").unwrap();
            app.toggle(0).unwrap();
        }

        let mut app = App::new(TaskStore::new(&config));
        app.populate();

        assert_eq!(app.view().len(), 1);
        assert_eq!(app.view().item_at(0).unwrap().placeholder, "persisted");
        assert!(app.view().item_at(0).unwrap().checked);
        assert!(app.clear_enabled());
    }

    #[test]
    fn test_out_of_range_positions_are_noops() {
        let (mut app, _temp) = test_app();
        app.create_task("only").unwrap();

        app.commit_edit(7, "text").unwrap();
        app.toggle(7).unwrap();
        app.remove_task(7).unwrap();

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks().tasks()[0].description, "only");
        assert!(!app.tasks().tasks()[0].completed);
    }

    #[test]
    fn test_select_tracks_one_row_at_a_time() {
        let (mut app, _temp) = test_app();
        app.create_task("a").unwrap();
        app.create_task("b").unwrap();

        let first = app.view().item_at(0).unwrap().handle;
        let second = app.view().item_at(1).unwrap().handle;

        app.select(first);
        app.select(second);

        assert_eq!(app.view().selected(), Some(second));
    }
}
