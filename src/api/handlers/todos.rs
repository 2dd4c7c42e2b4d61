//! Todo CRUD endpoints.
//!
//! Every route requires a bearer token. Handlers translate the store's explicit
//! outcomes into status codes; nothing here panics on bad input.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path,
    },
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use super::auth::{require_auth, AuthState};
use crate::api::error::{ApiError, ErrorResponse};
use crate::todo::{AddOutcome, DeleteOutcome, NewTodo, Todo, TodoStore, UpdateOutcome};

#[utoipa::path(
    get,
    path = "/api/todo",
    responses(
        (status = 200, description = "All todos", body = [Todo]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
    ),
    security(("bearer_token" = [])),
    tag = "todo"
)]
pub async fn list_todos(
    headers: HeaderMap,
    auth: Extension<Arc<AuthState>>,
    store: Extension<TodoStore>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    require_auth(&headers, auth.verifier())?;

    info!("Fetching all todos");

    Ok(Json(store.list().await))
}

#[utoipa::path(
    get,
    path = "/api/todo/{id}",
    params(
        ("id" = i64, Path, description = "Todo id")
    ),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
    ),
    security(("bearer_token" = [])),
    tag = "todo"
)]
pub async fn get_todo(
    path: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    auth: Extension<Arc<AuthState>>,
    store: Extension<TodoStore>,
) -> Result<Json<Todo>, ApiError> {
    require_auth(&headers, auth.verifier())?;

    let id = todo_id(path)?;

    store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::todo_not_found(id))
}

#[utoipa::path(
    post,
    path = "/api/todo",
    request_body = NewTodo,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Missing title or malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 409, description = "A todo with the same title exists", body = ErrorResponse),
    ),
    security(("bearer_token" = [])),
    tag = "todo"
)]
pub async fn add_todo(
    headers: HeaderMap,
    auth: Extension<Arc<AuthState>>,
    store: Extension<TodoStore>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<Response, ApiError> {
    require_auth(&headers, auth.verifier())?;

    let todo = validated(payload)?;
    let title = todo.title.clone();

    info!("Adding todo: {title}");

    match store.add(todo).await {
        AddOutcome::Created(created) => {
            let location = HeaderValue::from_str(&format!("/api/todo/{}", created.id))
                .map_err(|err| ApiError::Internal(format!("Invalid location header: {err}")))?;

            Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)).into_response())
        }
        AddOutcome::Duplicate => Err(ApiError::duplicate_title(&title)),
    }
}

#[utoipa::path(
    put,
    path = "/api/todo/{id}",
    params(
        ("id" = i64, Path, description = "Todo id")
    ),
    request_body = NewTodo,
    responses(
        (status = 204, description = "Todo updated"),
        (status = 400, description = "Bad id, missing title or malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
    ),
    security(("bearer_token" = [])),
    tag = "todo"
)]
pub async fn update_todo(
    path: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    auth: Extension<Arc<AuthState>>,
    store: Extension<TodoStore>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers, auth.verifier())?;

    let id = todo_id(path)?;
    let todo = validated(payload)?;

    info!("Updating todo with ID {id}");

    match store.update(id, todo).await {
        UpdateOutcome::Updated(_) => Ok(StatusCode::NO_CONTENT),
        UpdateOutcome::NotFound => Err(ApiError::todo_not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/todo/{id}",
    params(
        ("id" = i64, Path, description = "Todo id")
    ),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
    ),
    security(("bearer_token" = [])),
    tag = "todo"
)]
pub async fn delete_todo(
    path: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    auth: Extension<Arc<AuthState>>,
    store: Extension<TodoStore>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers, auth.verifier())?;

    let id = todo_id(path)?;

    info!("Deleting todo with ID {id}");

    match store.delete(id).await {
        DeleteOutcome::Deleted(_) => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => Err(ApiError::todo_not_found(id)),
    }
}

// Resolved after the token check so an anonymous caller always gets 401.
fn todo_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = path.map_err(|rejection| {
        warn!("Rejected todo id: {rejection}");
        ApiError::BadRequest(rejection.body_text())
    })?;

    Ok(id)
}

fn validated(payload: Result<Json<NewTodo>, JsonRejection>) -> Result<NewTodo, ApiError> {
    let Json(todo) = payload.map_err(|rejection| {
        warn!("Rejected todo payload: {rejection}");
        ApiError::BadRequest(rejection.body_text())
    })?;

    if todo.title.trim().is_empty() {
        return Err(ApiError::BadRequest("The Title field is required.".to_string()));
    }

    Ok(todo)
}
