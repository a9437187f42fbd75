//! Todo collection use-case service.
//!
//! # Responsibility
//! - Provide the create/list/update/delete entry points for API callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::todo::{Todo, TodoId, TodoInput};
use crate::repo::todo_repo::{RepoError, RepoResult, TodoRepository};
use uuid::Uuid;

/// Use-case service wrapper for the todo collection.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new todo and returns the stored record.
    ///
    /// # Contract
    /// - Fails with `RepoError::Validation` when `title` is absent or empty.
    /// - The returned record carries the generated id.
    pub fn create_todo(&self, input: TodoInput) -> RepoResult<Todo> {
        let todo = Todo::from_input(input)?;
        self.repo.create_todo(&todo)?;
        Ok(todo)
    }

    /// Lists every todo in store-default order.
    pub fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos()
    }

    /// Gets one todo by id.
    pub fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id)
    }

    /// Replaces title/description of an existing todo.
    ///
    /// # Contract
    /// - `RepoError::NotFound` when `id` matches nothing; no record is created.
    /// - New values are stored as given, empty strings included.
    pub fn update_todo(&self, id: TodoId, input: &TodoInput) -> RepoResult<Todo> {
        self.repo.update_todo(id, input)
    }

    /// Hard-deletes a todo and returns the removed record.
    pub fn delete_todo(&self, id: TodoId) -> RepoResult<Todo> {
        self.repo.delete_todo(id)
    }
}

/// Parses an id taken from a request path.
///
/// A malformed id is a store-level failure, not a not-found.
pub fn parse_todo_id(raw: &str) -> RepoResult<TodoId> {
    Uuid::parse_str(raw.trim()).map_err(|_| RepoError::InvalidId(raw.to_string()))
}
