//! Coordination between a table's dialogs and its store.
//!
//! The controller owns the store, the view state and the open/closed state of
//! the create-edit form and the delete confirmation. It only dispatches into
//! the store's mutators; it never edits entities in place.

use serde::{de::DeserializeOwned, Serialize};

use super::entity::{HasId, Row};
use super::store::EntityStore;
use super::view::{PageView, TableView};

pub struct TableController<T> {
    store: EntityStore<T>,
    view: TableView,
    form_open: bool,
    editing: Option<String>,
    pending_delete: Option<String>,
}

impl<T> TableController<T>
where
    T: Row + Clone + Serialize + DeserializeOwned,
{
    pub fn new(store: EntityStore<T>) -> Self {
        Self {
            store,
            view: TableView::new(),
            form_open: false,
            editing: None,
            pending_delete: None,
        }
    }

    pub fn with_view(mut self, view: TableView) -> Self {
        self.view = view;
        self
    }

    pub fn store(&self) -> &EntityStore<T> {
        &self.store
    }

    pub fn view(&mut self) -> &mut TableView {
        &mut self.view
    }

    /// Derive the current page from the bound store.
    pub fn page(&mut self) -> PageView<'_, T> {
        self.view.compute(self.store.data())
    }

    // --- dialog state ---------------------------------------------------

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form_open = true;
    }

    /// Open the form pre-filled for an existing entity. No-op when the id is
    /// absent from the store.
    pub fn open_edit(&mut self, id: &str) {
        if self.store.get(id).is_some() {
            self.editing = Some(id.to_string());
            self.form_open = true;
        }
    }

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_dialogs(&mut self) {
        self.form_open = false;
        self.editing = None;
        self.pending_delete = None;
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn editing_item(&self) -> Option<&T> {
        self.editing.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    // --- dispatch into the store ----------------------------------------

    /// Submit the form. Editing dispatches an update (identifier preserved by
    /// the store); otherwise the draft becomes a new entity with a fresh id.
    /// Returns the id of the affected entity.
    pub fn submit(&mut self, draft: T) -> String {
        let id = match self.editing.take() {
            Some(id) => {
                self.store.update(&id, |slot| *slot = draft);
                id
            }
            None => self.store.add(draft),
        };
        self.form_open = false;
        id
    }

    /// Confirm the pending delete, if any. Returns whether a row was removed.
    pub fn confirm_delete(&mut self) -> bool {
        match self.pending_delete.take() {
            Some(id) => {
                let removed = self.store.delete(&id);
                // Selection pruning happens on the next compute.
                removed
            }
            None => false,
        }
    }
}
