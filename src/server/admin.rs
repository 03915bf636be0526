//! `/admin`: management of every user, note and task.
//!
//! All routes here sit behind [`crate::auth::require_admin`], which inserts
//! the checked [`AdminUser`] as a request extension.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Extension, Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;
use crate::auth::password::hash_password;
use crate::auth::AdminUser;
use crate::entity::{NoteView, Task, User};
use crate::error::{NotedeckError, Result};

#[derive(Debug, Serialize)]
pub struct Counts {
    pub users: usize,
    pub notes: usize,
    pub tasks: usize,
    pub uploads: usize,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub admin: String,
    pub counts: Counts,
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct EditUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn dashboard(
    Extension(admin): Extension<AdminUser>,
    State(state): State<AppState>,
) -> Result<Json<Dashboard>> {
    let store = state.store.lock().await;
    Ok(Json(Dashboard {
        admin: admin.0.user.username.clone(),
        counts: Counts {
            users: store.count_users()?,
            notes: store.count_notes()?,
            tasks: store.count_tasks()?,
            uploads: store.count_uploads()?,
        },
        users: store.list_users()?,
    }))
}

pub async fn users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_users()?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    let store = state.store.lock().await;
    let user = store
        .get_user(id)?
        .ok_or_else(|| NotedeckError::NotFound(format!("User {}", id)))?;
    Ok(Json(user))
}

pub async fn edit_user(
    Extension(admin): Extension<AdminUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditUserForm>,
) -> Result<Redirect> {
    let username = form.username.trim();
    if username.is_empty() {
        return Err(NotedeckError::BadRequest("Username is required".to_string()));
    }

    let password_hash = if form.password.is_empty() {
        None
    } else {
        Some(hash_password(&form.password)?)
    };

    {
        let store = state.store.lock().await;
        store.update_user_credentials(id, username, password_hash.as_deref())?;
    }

    info!(admin_id = admin.id(), user_id = id, password_changed = password_hash.is_some(), "User updated");
    Ok(Redirect::to("/admin/users"))
}

pub async fn delete_user(
    Extension(admin): Extension<AdminUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    if id == admin.id() {
        return Err(NotedeckError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    let orphaned: Vec<String> = {
        let store = state.store.lock().await;
        if store.get_user(id)?.is_none() {
            return Err(NotedeckError::NotFound(format!("User {}", id)));
        }

        let mut files: Vec<String> = store
            .list_notes_for_user(id)?
            .into_iter()
            .filter_map(|view| view.note.image_filename)
            .chain(
                store
                    .list_uploads_for_user(id)?
                    .into_iter()
                    .map(|upload| upload.filename),
            )
            .collect();
        files.sort();
        files.dedup();

        store.delete_user(id)?;

        // Names can collide across users; keep files someone else still uses.
        let mut orphaned = Vec::with_capacity(files.len());
        for filename in files {
            if !store.media_in_use(&filename)? {
                orphaned.push(filename);
            }
        }
        orphaned
    };

    for filename in &orphaned {
        if let Err(e) = state.media.remove(filename).await {
            warn!(user_id = id, %filename, error = %e, "Failed to remove media file");
        }
    }

    info!(admin_id = admin.id(), user_id = id, "User deleted");
    Ok(Redirect::to("/admin/users"))
}

pub async fn pages(State(state): State<AppState>) -> Result<Json<Vec<NoteView>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_all_notes()?))
}

pub async fn delete_page(
    Extension(admin): Extension<AdminUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let note = {
        let store = state.store.lock().await;
        let note = store
            .get_note(id)?
            .ok_or_else(|| NotedeckError::NotFound(format!("Note {}", id)))?;
        store.delete_note(id)?;
        note
    };

    if let Some(filename) = &note.image_filename {
        if let Err(e) = state.media.remove(filename).await {
            warn!(note_id = id, error = %e, "Failed to remove note image");
        }
    }

    info!(admin_id = admin.id(), note_id = id, "Note deleted by admin");
    Ok(Redirect::to("/admin/pages"))
}

/// Every task, keyed by category.
pub async fn tasks(State(state): State<AppState>) -> Result<Json<BTreeMap<String, Vec<Task>>>> {
    let tasks = {
        let store = state.store.lock().await;
        store.list_all_tasks()?
    };

    let mut by_category: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        by_category.entry(task.category.clone()).or_default().push(task);
    }
    Ok(Json(by_category))
}

pub async fn delete_task(
    Extension(admin): Extension<AdminUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    {
        let store = state.store.lock().await;
        if !store.delete_task(id)? {
            return Err(NotedeckError::NotFound(format!("Task {}", id)));
        }
    }

    info!(admin_id = admin.id(), task_id = id, "Task deleted by admin");
    Ok(Redirect::to("/admin/tasks"))
}
