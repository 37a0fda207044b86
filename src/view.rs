// View synchronizer
// Mirrors the collection as an ordered list of renderable items and
// tracks the single-selection state machine. Holds no task data of its
// own beyond what rendering needs.

use crate::tasks::Task;

/// Opaque identity of a rendered item, distinct from its position
pub type ItemHandle = u64;

/// Role of the trailing action control on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionControl {
    /// Reorder-handle affordance shown while the item is idle
    Handle,
    /// Delete affordance shown while the item is selected
    Trash,
}

/// One rendered list row
#[derive(Debug, Clone)]
pub struct ItemView {
    /// Stable identity of the row, independent of reordering
    pub handle: ItemHandle,
    /// Position identifier, kept equal to the task's collection index
    pub id: usize,
    /// Editable field placeholder, pre-filled with the description
    pub placeholder: String,
    /// Completion toggle state
    pub checked: bool,
    /// Current action-control role
    pub action: ActionControl,
}

/// Ordered visual list; child order matches the collection order
#[derive(Debug, Clone, Default)]
pub struct ListView {
    items: Vec<ItemView>,
    selected: Option<ItemHandle>,
    next_handle: ItemHandle,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a task into a new row appended at the end of the list
    pub fn render(&mut self, task: &Task) -> ItemHandle {
        let handle = self.allocate_handle();
        self.items.push(ItemView {
            handle,
            id: task.index,
            placeholder: task.description.clone(),
            checked: task.completed,
            action: ActionControl::Handle,
        });
        handle
    }

    /// Allocate a row handle
    fn allocate_handle(&mut self) -> ItemHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currently selected row, if any
    pub fn selected(&self) -> Option<ItemHandle> {
        self.selected
    }

    /// Row at the given position
    pub fn item_at(&self, position: usize) -> Option<&ItemView> {
        self.items.get(position)
    }

    /// Position of the row with the given handle
    pub fn position_of(&self, handle: ItemHandle) -> Option<usize> {
        self.items.iter().position(|item| item.handle == handle)
    }

    fn item_mut(&mut self, handle: ItemHandle) -> Option<&mut ItemView> {
        self.items.iter_mut().find(|item| item.handle == handle)
    }

    /// Move the selection to the row with the given handle.
    /// Re-selecting the current row is a no-op; the previously selected
    /// row returns to idle and its action control flips back to the
    /// reorder handle. Unknown handles leave the selection untouched.
    pub fn select(&mut self, handle: ItemHandle) {
        if self.selected == Some(handle) {
            return;
        }
        if self.position_of(handle).is_none() {
            return;
        }

        if let Some(previous) = self.selected.take() {
            if let Some(item) = self.item_mut(previous) {
                item.action = ActionControl::Handle;
            }
        }

        if let Some(item) = self.item_mut(handle) {
            item.action = ActionControl::Trash;
        }
        self.selected = Some(handle);
    }

    /// Drop any selection, returning the selected row to idle
    pub fn deselect(&mut self) {
        if let Some(previous) = self.selected.take() {
            if let Some(item) = self.item_mut(previous) {
                item.action = ActionControl::Handle;
            }
        }
    }

    /// Overwrite the position identifier of the row at `position`
    pub fn set_identifier(&mut self, position: usize, id: usize) {
        if let Some(item) = self.items.get_mut(position) {
            item.id = id;
        }
    }

    /// Overwrite the placeholder of the row at `position`
    pub fn set_placeholder(&mut self, position: usize, text: &str) {
        if let Some(item) = self.items.get_mut(position) {
            item.placeholder = text.to_string();
        }
    }

    /// Overwrite the toggle state of the row at `position`
    pub fn set_checked(&mut self, position: usize, checked: bool) {
        if let Some(item) = self.items.get_mut(position) {
            item.checked = checked;
        }
    }

    /// Remove the row at `position`, clearing the selection if it
    /// pointed there
    pub fn remove_at(&mut self, position: usize) {
        if position >= self.items.len() {
            return;
        }
        let removed = self.items.remove(position);
        if self.selected == Some(removed.handle) {
            self.selected = None;
        }
    }

    /// Position identifiers of all checked rows, in list order
    pub fn checked_ids(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.id)
            .collect()
    }

    /// Remove every checked row, clearing the selection if it pointed
    /// at one of them
    pub fn remove_checked(&mut self) {
        if let Some(selected) = self.selected {
            let selected_checked = self
                .items
                .iter()
                .find(|item| item.handle == selected)
                .map(|item| item.checked)
                .unwrap_or(false);
            if selected_checked {
                self.selected = None;
            }
        }
        self.items.retain(|item| !item.checked);
    }
}
