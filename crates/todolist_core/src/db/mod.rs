//! Document store bootstrap for the todo collection.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the collection.
//! - Create the `todos` table on first open.
//!
//! # Invariants
//! - No todo is read or written before the schema exists.
//! - Reopening an existing store leaves its rows untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory, open_store, IN_MEMORY_STORE};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    EmptyConnectionString,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::EmptyConnectionString => write!(f, "store connection string cannot be empty"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::EmptyConnectionString => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
