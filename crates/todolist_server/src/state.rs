//! Shared handler state: the store handle.
//!
//! # Invariants
//! - Store calls run on the blocking pool, never on a runtime worker.
//! - The connection is used by one request at a time; requests never share
//!   a transaction.

use crate::error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use todolist_core::db::{open_store, DbResult};
use todolist_core::{RepoResult, SqliteTodoRepository, TodoService};

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            store: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens the store named by the startup connection string.
    pub fn open(connection_string: &str) -> DbResult<Self> {
        Ok(Self::new(open_store(connection_string)?))
    }

    /// Runs one service call against the store.
    pub async fn with_service<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&TodoService<SqliteTodoRepository<'_>>) -> RepoResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let conn = store.lock().map_err(|_| ApiError::StorePoisoned)?;
            let service = TodoService::new(SqliteTodoRepository::new(&conn));
            f(&service).map_err(ApiError::from)
        })
        .await?
    }
}
