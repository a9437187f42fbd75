//! Handler error mapping.
//!
//! Every failure is logged with its cause, then reported to the caller as a
//! fixed message: 404 for a missing todo, the extractor's status for an
//! unreadable body, 500 for everything else.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todolist_core::RepoError;

pub const NOT_FOUND_MESSAGE: &str = "Todo not found";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";
pub const CREATE_ERROR_MESSAGE: &str = "Error creating todo";

/// Failures raised while serving a collection request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error("store lock poisoned")]
    StorePoisoned,

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Repo(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Body(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the failure and converts it into the response for `op`.
    pub fn reject(self, op: Operation) -> ApiRejection {
        let status = self.status();
        let message = if status == StatusCode::NOT_FOUND {
            warn!(
                "event={} module=api status=not_found error={}",
                op.event(),
                self
            );
            NOT_FOUND_MESSAGE
        } else {
            error!("event={} module=api status=error error={}", op.event(), self);
            op.failure_message()
        };
        ApiRejection { status, message }
    }
}

/// Collection operation a handler is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Update,
    Delete,
}

impl Operation {
    pub fn event(self) -> &'static str {
        match self {
            Self::Create => "todo_create",
            Self::List => "todo_list",
            Self::Update => "todo_update",
            Self::Delete => "todo_delete",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::Create => CREATE_ERROR_MESSAGE,
            Self::List | Self::Update | Self::Delete => SERVER_ERROR_MESSAGE,
        }
    }
}

/// `{"message": ...}` body used for errors and delete confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response returned by handlers.
#[derive(Debug)]
pub struct ApiRejection {
    status: StatusCode,
    message: &'static str,
}

impl ApiRejection {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        (self.status, Json(MessageBody::new(self.message))).into_response()
    }
}
