//! Core domain logic for the todo list manager.
//! This crate is the single source of truth for collection invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{Todo, TodoId, TodoInput, TodoValidationError};
pub use repo::todo_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use service::todo_service::{parse_todo_id, TodoService};
