//! Todo endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{TodoId, ValidJson};
use crate::models::{Todo, TodoInput};
use crate::state::AppState;

/// GET /todos - every todo, ordered by id
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store().list().await?;
    Ok(Json(todos))
}

/// POST /todos - create a new todo
async fn create_todo(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.store().create(input).await?;
    tracing::info!(id = todo.id, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /todos/{id} - get a single todo
async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    state
        .store()
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// PUT /todos/{id} - replace title and done
async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    ValidJson(input): ValidJson<TodoInput>,
) -> Result<Json<Todo>, ApiError> {
    state
        .store()
        .update(id, input)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<StatusCode, ApiError> {
    if state.store().delete(id).await? {
        tracing::info!(id, "Todo deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
