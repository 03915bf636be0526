//! `/api/notes`: personal notes, the public listing and voting.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::extract::ApiJson;
use super::AppState;
use crate::auth::CurrentUser;
use crate::entity::{Note, NoteView, VoteDirection, VoteOutcome};
use crate::error::{NotedeckError, Result};
use crate::search;
use crate::storage::NoteUpdate;
use crate::uploads;

/// JSON body for creating a note.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub topic: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PublicQuery {
    pub query: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub message: &'static str,
    pub outcome: VoteOutcome,
    pub vote: Option<VoteDirection>,
    pub score: i64,
}

/// A new note, sent either as JSON or as a multipart form carrying an
/// optional `image` file.
#[derive(Debug, Default)]
pub struct NoteSubmission {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: bool,
    pub topic: Option<String>,
    /// Client filename and bytes of the attached image
    pub image: Option<(String, Bytes)>,
}

fn is_checked(value: &str) -> bool {
    matches!(value.trim(), "on" | "true" | "1")
}

impl<S> FromRequest<S> for NoteSubmission
where
    S: Send + Sync,
{
    type Rejection = NotedeckError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let ApiJson(body) = ApiJson::<CreateNoteRequest>::from_request(req, state).await?;
            return Ok(NoteSubmission {
                title: body.title,
                content: body.content,
                is_public: body.is_public,
                topic: body.topic,
                image: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| NotedeckError::BadRequest(e.body_text()))?;

        let mut submission = NoteSubmission::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| NotedeckError::BadRequest(format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| NotedeckError::BadRequest(format!("Read error: {}", e)))?;
                    // Browsers send an empty part when no file was chosen
                    if !filename.is_empty() && !data.is_empty() {
                        submission.image = Some((filename, data));
                    }
                }
                "title" | "content" | "is_public" | "topic" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| NotedeckError::BadRequest(format!("Read error: {}", e)))?;
                    match name.as_str() {
                        "title" => submission.title = Some(text),
                        "content" => submission.content = Some(text),
                        "is_public" => submission.is_public = is_checked(&text),
                        _ => submission.topic = Some(text),
                    }
                }
                _ => {}
            }
        }

        Ok(submission)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn load_note(note: Option<Note>, id: i64) -> Result<Note> {
    note.ok_or_else(|| NotedeckError::NotFound(format!("Note {}", id)))
}

pub async fn list_notes(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NoteView>>> {
    let store = state.store.lock().await;
    Ok(Json(store.list_notes_for_user(current.id())?))
}

pub async fn create_note(
    current: CurrentUser,
    State(state): State<AppState>,
    submission: NoteSubmission,
) -> Result<(StatusCode, Json<Value>)> {
    let (Some(title), Some(content)) = (
        non_blank(submission.title),
        submission.content.filter(|c| !c.trim().is_empty()),
    ) else {
        return Err(NotedeckError::BadRequest("Missing title or content".to_string()));
    };

    let mut note = Note::new(current.id(), title, content);
    note.is_public = submission.is_public;
    note.topic = non_blank(submission.topic);

    if let Some((raw_name, data)) = submission.image {
        let filename = uploads::accept_image(&raw_name)?;
        state.media.save(&filename, &data).await?;
        note.image_filename = Some(filename);
    }

    let id = {
        let store = state.store.lock().await;
        store.add_note(&note)?
    };

    info!(user_id = current.id(), note_id = id, public = note.is_public, "Note created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Note created successfully", "id": id })),
    ))
}

pub async fn get_note(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<NoteView>> {
    let store = state.store.lock().await;
    let view = store
        .get_note_view(id)?
        .ok_or_else(|| NotedeckError::NotFound(format!("Note {}", id)))?;

    if !view.note.visible_to(current.id()) && !current.is_admin() {
        return Err(NotedeckError::unauthorized());
    }
    Ok(Json(view))
}

pub async fn update_note(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UpdateNoteRequest>,
) -> Result<Json<Value>> {
    if body.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(NotedeckError::BadRequest("Title cannot be empty".to_string()));
    }

    let store = state.store.lock().await;
    let note = load_note(store.get_note(id)?, id)?;
    if note.user_id != current.id() {
        return Err(NotedeckError::unauthorized());
    }

    store.update_note(
        id,
        NoteUpdate {
            title: body.title.map(|t| t.trim().to_string()),
            content: body.content,
            is_public: body.is_public,
            topic: body.topic.map(|t| non_blank(Some(t))),
            image_filename: None,
        },
    )?;

    debug!(note_id = id, "Note updated");
    Ok(Json(json!({ "message": "updated" })))
}

pub async fn delete_note(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let note = {
        let store = state.store.lock().await;
        let note = load_note(store.get_note(id)?, id)?;
        if note.user_id != current.id() && !current.is_admin() {
            return Err(NotedeckError::unauthorized());
        }
        store.delete_note(id)?;
        note
    };

    if let Some(filename) = &note.image_filename {
        if let Err(e) = state.media.remove(filename).await {
            warn!(note_id = id, error = %e, "Failed to remove note image");
        }
    }

    info!(user_id = current.id(), note_id = id, "Note deleted");
    Ok(Json(json!({ "message": "deleted" })))
}

pub async fn public_notes(
    _current: CurrentUser,
    State(state): State<AppState>,
    Query(params): Query<PublicQuery>,
) -> Result<Json<Vec<NoteView>>> {
    let filter = search::build_filter(params.query.as_deref(), params.topic.as_deref());
    let limit = search::clamp_limit(params.limit);

    let store = state.store.lock().await;
    Ok(Json(store.list_public_notes(&filter, limit)?))
}

pub async fn vote_note(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<VoteRequest>,
) -> Result<Json<VoteResponse>> {
    let direction: VoteDirection = body
        .vote_type
        .as_deref()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| NotedeckError::BadRequest("vote_type must be 'up' or 'down'".to_string()))?;

    let store = state.store.lock().await;
    let note = load_note(store.get_note(id)?, id)?;
    if !note.visible_to(current.id()) && !current.is_admin() {
        return Err(NotedeckError::NotFound(format!("Note {}", id)));
    }

    let outcome = store.toggle_vote(current.id(), id, direction)?;
    let vote = store.get_vote(current.id(), id)?;
    let score = store.note_score(id)?;

    debug!(user_id = current.id(), note_id = id, ?outcome, "Vote toggled");
    Ok(Json(VoteResponse {
        message: "vote updated",
        outcome,
        vote,
        score,
    }))
}
