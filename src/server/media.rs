//! `/upload`: image and video uploads grouped by category.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::response::Redirect;
use axum::Json;
use tracing::{info, warn};

use super::AppState;
use crate::auth::CurrentUser;
use crate::entity::{Upload, UNCATEGORIZED};
use crate::error::{NotedeckError, Result};
use crate::uploads;

/// The caller's uploads keyed by category.
pub async fn list_uploads(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<Upload>>>> {
    let uploads = {
        let store = state.store.lock().await;
        store.list_uploads_for_user(current.id())?
    };

    let mut by_category: BTreeMap<String, Vec<Upload>> = BTreeMap::new();
    for upload in uploads {
        by_category
            .entry(upload.category.clone())
            .or_default()
            .push(upload);
    }
    Ok(Json(by_category))
}

pub async fn upload_file(
    current: CurrentUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut file: Option<(String, Bytes)> = None;
    let mut category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| NotedeckError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| NotedeckError::BadRequest(format!("Read error: {}", e)))?;
                file = Some((filename, data));
            }
            "category" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| NotedeckError::BadRequest(format!("Read error: {}", e)))?;
                category = Some(text);
            }
            _ => {}
        }
    }

    let (raw_name, data) = file
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| NotedeckError::BadRequest("No file provided".to_string()))?;

    let (filename, kind) = match uploads::accept_media(&raw_name) {
        Ok(accepted) => accepted,
        Err(e) => {
            warn!(user_id = current.id(), filename = %raw_name, "Rejected upload");
            return Err(e);
        }
    };

    let category = category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| UNCATEGORIZED.to_string());

    state.media.save(&filename, &data).await?;

    let id = {
        let store = state.store.lock().await;
        store.add_upload(&Upload::new(current.id(), filename.clone(), kind, category))?
    };

    info!(user_id = current.id(), upload_id = id, %filename, %kind, size = data.len() as u64, "File uploaded");
    Ok(Redirect::to("/upload"))
}
