//! Client-side mirror of the todo collection.
//!
//! # Responsibility
//! - Hold the local list plus add/edit drafts and user-facing status text.
//! - Translate user actions into API calls and apply results locally.
//!
//! # Invariants
//! - Local state changes only after the service confirms an operation.
//! - At most one todo is in edit mode; a new edit replaces the old one.
//! - A failed request sets an error string and leaves the list intact.

use crate::api::TodoApi;
use log::warn;
use std::time::{Duration, Instant};
use todolist_core::{Todo, TodoId, TodoInput};

/// How long a success message stays visible.
pub const FLASH_TTL: Duration = Duration::from_secs(3);

pub const FIELDS_REQUIRED: &str = "Both fields are required!";
pub const FETCH_FAILED: &str = "Failed to fetch todos";
pub const CREATE_FAILED: &str = "Unable to create Todo item";
pub const UPDATE_FAILED: &str = "Unable to update Todo item";
pub const DELETE_FAILED: &str = "Failed to delete item";
pub const ITEM_ADDED: &str = "Item added successfully";
pub const ITEM_UPDATED: &str = "Item updated successfully";

/// Title/description pair being typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields must contain something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    fn to_input(&self) -> TodoInput {
        TodoInput::new(self.title.clone(), self.description.clone())
    }
}

/// The todo currently in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: TodoId,
    pub draft: Draft,
}

#[derive(Debug, Clone)]
struct Flash {
    text: &'static str,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct TodoBoard {
    todos: Vec<Todo>,
    /// Add-form contents.
    pub draft: Draft,
    edit: Option<EditState>,
    error: Option<&'static str>,
    flash: Option<Flash>,
}

impl TodoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.edit.as_ref()
    }

    /// Mutable access to the edit form, if an edit is in progress.
    pub fn edit_draft_mut(&mut self) -> Option<&mut Draft> {
        self.edit.as_mut().map(|edit| &mut edit.draft)
    }

    /// Success message visible at `now`, if any.
    pub fn message_at(&self, now: Instant) -> Option<&'static str> {
        self.flash
            .as_ref()
            .filter(|flash| now.saturating_duration_since(flash.shown_at) < FLASH_TTL)
            .map(|flash| flash.text)
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message_at(Instant::now())
    }

    /// Replaces the local list with the service's list.
    pub async fn load<A: TodoApi + ?Sized>(&mut self, api: &A) -> bool {
        match api.list().await {
            Ok(todos) => {
                self.todos = todos;
                true
            }
            Err(err) => {
                warn!("event=board_load module=client status=error error={err}");
                self.error = Some(FETCH_FAILED);
                false
            }
        }
    }

    /// Submits the add form.
    pub async fn add<A: TodoApi + ?Sized>(&mut self, api: &A) -> bool {
        self.error = None;
        if !self.draft.is_complete() {
            self.error = Some(FIELDS_REQUIRED);
            return false;
        }

        match api.create(&self.draft.to_input()).await {
            Ok(created) => {
                self.todos.push(created);
                self.draft = Draft::default();
                self.show(ITEM_ADDED);
                true
            }
            Err(err) => {
                warn!("event=board_add module=client status=error error={err}");
                self.error = Some(CREATE_FAILED);
                false
            }
        }
    }

    /// Enters edit mode for `id`, seeded with its current values.
    ///
    /// Any unsaved edit is discarded. Returns `false` when `id` is not in the
    /// local list.
    pub fn begin_edit(&mut self, id: TodoId) -> bool {
        let Some(todo) = self.todos.iter().find(|todo| todo.id == id) else {
            return false;
        };
        self.edit = Some(EditState {
            id,
            draft: Draft::new(todo.title.clone(), todo.description.clone()),
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Saves the edit form. Edit mode stays active when saving fails.
    pub async fn save_edit<A: TodoApi + ?Sized>(&mut self, api: &A) -> bool {
        self.error = None;
        let Some(edit) = self.edit.clone() else {
            return false;
        };
        if !edit.draft.is_complete() {
            self.error = Some(FIELDS_REQUIRED);
            return false;
        }

        match api.update(edit.id, &edit.draft.to_input()).await {
            Ok(_) => {
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == edit.id) {
                    todo.title = edit.draft.title;
                    todo.description = edit.draft.description;
                }
                self.edit = None;
                self.show(ITEM_UPDATED);
                true
            }
            Err(err) => {
                warn!(
                    "event=board_update module=client status=error id={} error={err}",
                    edit.id
                );
                self.error = Some(UPDATE_FAILED);
                false
            }
        }
    }

    /// Deletes `id` after `confirm` approves it.
    ///
    /// A 404 also drops the local copy, since the item is gone either way.
    pub async fn delete<A, F>(&mut self, api: &A, id: TodoId, confirm: F) -> bool
    where
        A: TodoApi + ?Sized,
        F: FnOnce(&Todo) -> bool,
    {
        self.error = None;
        let Some(todo) = self.todos.iter().find(|todo| todo.id == id) else {
            return false;
        };
        if !confirm(todo) {
            return false;
        }

        match api.delete(id).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                warn!("event=board_delete module=client status=not_found id={id}");
            }
            Err(err) => {
                warn!("event=board_delete module=client status=error id={id} error={err}");
                self.error = Some(DELETE_FAILED);
                return false;
            }
        }

        self.todos.retain(|todo| todo.id != id);
        if self.edit.as_ref().is_some_and(|edit| edit.id == id) {
            self.edit = None;
        }
        true
    }

    fn show(&mut self, text: &'static str) {
        self.flash = Some(Flash {
            text,
            shown_at: Instant::now(),
        });
    }
}
