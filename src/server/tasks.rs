//! `/api/tasks`: per-user to-do items grouped by free-text category.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::extract::ApiJson;
use super::AppState;
use crate::auth::CurrentUser;
use crate::entity::Task;
use crate::error::{NotedeckError, Result};
use crate::storage::TaskUpdate;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCategoryRequest {
    pub category: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Load a task and make sure it belongs to `user_id`.
fn owned_task(task: Option<Task>, id: i64, user_id: i64) -> Result<Task> {
    let task = task.ok_or_else(|| NotedeckError::NotFound(format!("Task {}", id)))?;
    if task.user_id != user_id {
        return Err(NotedeckError::unauthorized());
    }
    Ok(task)
}

pub async fn list_tasks(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Task>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_tasks_for_user(current.id())?))
}

pub async fn create_task(
    current: CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let (Some(description), Some(category)) = (present(body.description), present(body.category))
    else {
        return Err(NotedeckError::BadRequest(
            "Missing description or category".to_string(),
        ));
    };

    let id = {
        let store = state.store.lock().await;
        store.add_task(&Task::new(current.id(), description, category))?
    };

    info!(user_id = current.id(), task_id = id, "Task created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Task created", "id": id })),
    ))
}

pub async fn update_task(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateTaskRequest>,
) -> Result<Json<Value>> {
    let store = state.store.lock().await;
    owned_task(store.get_task(id)?, id, current.id())?;

    if body.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
        return Err(NotedeckError::BadRequest("Description cannot be empty".to_string()));
    }

    store.update_task(
        id,
        TaskUpdate {
            description: body.description,
            category: present(body.category),
        },
    )?;

    debug!(task_id = id, "Task updated");
    Ok(Json(json!({ "message": "Task updated" })))
}

pub async fn delete_task(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let store = state.store.lock().await;
    owned_task(store.get_task(id)?, id, current.id())?;
    store.delete_task(id)?;

    info!(user_id = current.id(), task_id = id, "Task deleted");
    Ok(Json(json!({ "message": "Task deleted" })))
}

pub async fn delete_category(
    current: CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DeleteCategoryRequest>,
) -> Result<Json<Value>> {
    let category = present(body.category)
        .ok_or_else(|| NotedeckError::BadRequest("Missing category".to_string()))?;

    let store = state.store.lock().await;
    let deleted = store.delete_tasks_in_category(current.id(), &category)?;

    info!(user_id = current.id(), %category, deleted = deleted as u64, "Task category cleared");
    Ok(Json(json!({ "status": "success", "deleted": deleted })))
}
