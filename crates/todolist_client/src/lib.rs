//! # todolist_client
//!
//! Client side of the todo list manager:
//! - [`TodoApiClient`]: async HTTP access to the `/todos` routes
//! - [`TodoBoard`]: local mirror of the collection driven by user actions

pub mod api;
pub mod board;
pub mod error;

pub use api::{TodoApi, TodoApiClient, DEFAULT_API_URL};
pub use board::{Draft, EditState, TodoBoard};
pub use error::{ClientError, ClientResult};
