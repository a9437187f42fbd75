//! HTTP routes for the todo collection.

use crate::error::{ApiError, ApiRejection, MessageBody, Operation};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use log::info;
use todolist_core::{parse_todo_id, Todo, TodoInput};
use tower_http::cors::CorsLayer;

pub const DELETE_CONFIRMATION: &str = "Todo deleted successfully";

/// Builds the API router. Any origin may call it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiRejection> {
    let Json(input) = read_body(body, Operation::Create)?;
    let todo = state
        .with_service(move |service| service.create_todo(input))
        .await
        .map_err(|err| err.reject(Operation::Create))?;

    info!("event=todo_create module=api status=ok id={}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiRejection> {
    let todos = state
        .with_service(|service| service.list_todos())
        .await
        .map_err(|err| err.reject(Operation::List))?;

    info!("event=todo_list module=api status=ok count={}", todos.len());
    Ok(Json(todos))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Result<Json<Todo>, ApiRejection> {
    let Json(input) = read_body(body, Operation::Update)?;
    let todo = state
        .with_service(move |service| {
            let id = parse_todo_id(&id)?;
            service.update_todo(id, &input)
        })
        .await
        .map_err(|err| err.reject(Operation::Update))?;

    info!("event=todo_update module=api status=ok id={}", todo.id);
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiRejection> {
    let removed = state
        .with_service(move |service| {
            let id = parse_todo_id(&id)?;
            service.delete_todo(id)
        })
        .await
        .map_err(|err| err.reject(Operation::Delete))?;

    info!("event=todo_delete module=api status=ok id={}", removed.id);
    Ok(Json(MessageBody::new(DELETE_CONFIRMATION)))
}

fn read_body(
    body: Result<Json<TodoInput>, JsonRejection>,
    op: Operation,
) -> Result<Json<TodoInput>, ApiRejection> {
    body.map_err(|rejection| ApiError::from(rejection).reject(op))
}
