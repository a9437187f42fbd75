//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/find-all/find-and-update/find-and-delete over `todos`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the record before SQL mutations.
//! - Read paths reject undecodable rows instead of masking them.
//! - Update and delete are single statements, so each request either fully
//!   applies or leaves the row untouched.

use crate::db::DbError;
use crate::model::todo::{Todo, TodoId, TodoInput, TodoValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_COLUMNS: &str = "uuid, title, description";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    InvalidId(String),
    InvalidData(String),
}

impl RepoError {
    /// Whether this error means "no such todo" rather than a store failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidId(raw) => write!(f, "malformed todo id `{raw}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store operations the collection API depends on.
pub trait TodoRepository {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId>;
    fn list_todos(&self) -> RepoResult<Vec<Todo>>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    fn update_todo(&self, id: TodoId, input: &TodoInput) -> RepoResult<Todo>;
    fn delete_todo(&self, id: TodoId) -> RepoResult<Todo>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        todo.validate()?;
        if todo.title.is_empty() {
            return Err(TodoValidationError::MissingTitle.into());
        }

        self.conn.execute(
            "INSERT INTO todos (uuid, title, description) VALUES (?1, ?2, ?3);",
            params![
                todo.id.to_string(),
                todo.title.as_str(),
                todo.description.as_str()
            ],
        )?;

        Ok(todo.id)
    }

    fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn update_todo(&self, id: TodoId, input: &TodoInput) -> RepoResult<Todo> {
        // COALESCE keeps the stored value for fields omitted from the body.
        let updated = self
            .conn
            .query_row(
                &format!(
                    "UPDATE todos
                     SET
                        title = COALESCE(?1, title),
                        description = COALESCE(?2, description),
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE uuid = ?3
                     RETURNING {TODO_COLUMNS};"
                ),
                params![
                    input.title.as_deref(),
                    input.description.as_deref(),
                    id.to_string()
                ],
                |row| Ok(parse_todo_row(row)),
            )
            .optional()?;

        // Decode failures ride out of `query_row` as the inner value.
        match updated {
            Some(row) => row,
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<Todo> {
        let deleted = self
            .conn
            .query_row(
                &format!("DELETE FROM todos WHERE uuid = ?1 RETURNING {TODO_COLUMNS};"),
                [id.to_string()],
                |row| Ok(parse_todo_row(row)),
            )
            .optional()?;

        match deleted {
            Some(row) => row,
            None => Err(RepoError::NotFound(id)),
        }
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in todos.uuid"))
    })?;

    let todo = Todo {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
    };
    todo.validate()?;
    Ok(todo)
}
