//! Todo domain model.
//!
//! # Responsibility
//! - Define the single record type held by the collection.
//! - Define the explicit request body used by create/update paths.
//!
//! # Invariants
//! - `id` is assigned on creation, never nil, and never reused.
//! - A created todo always carries a non-empty `title`.
//! - A missing `description` is stored as the empty string.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a todo item.
pub type TodoId = Uuid;

/// Canonical todo record, serialized as `{id, title, description}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Server-assigned identifier.
    pub id: TodoId,
    /// Short summary shown in lists.
    pub title: String,
    /// Free-form detail text. Empty when the caller did not supply one.
    #[serde(default)]
    pub description: String,
}

/// Request body accepted by create and update.
///
/// Both fields are optional on the wire so that presence checks happen in
/// one place instead of inside the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TodoInput {
    /// Builds an input carrying both fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }
}

/// Validation failures raised before a todo is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `title` was absent or empty on create.
    MissingTitle,
    /// `id` must never be the nil UUID.
    NilId,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title is required"),
            Self::NilId => write!(f, "todo id must not be nil"),
        }
    }
}

impl Error for TodoValidationError {}

impl Todo {
    /// Builds a new todo from request input with a freshly generated id.
    ///
    /// # Errors
    /// - `MissingTitle` when `title` is absent or empty.
    pub fn from_input(input: TodoInput) -> Result<Self, TodoValidationError> {
        let title = match input.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(TodoValidationError::MissingTitle),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: input.description.unwrap_or_default(),
        })
    }

    /// Checks identity invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        Ok(())
    }
}
