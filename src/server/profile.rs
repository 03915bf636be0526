//! Feed, explore and the caller's own profile.

use axum::extract::{Path, Query, State};
use axum::http::header::{HOST, REFERER};
use axum::http::{HeaderMap, Uri};
use axum::response::Redirect;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::extract::ApiJson;
use super::notes::PublicQuery;
use super::AppState;
use crate::auth::CurrentUser;
use crate::entity::{NoteView, PublicFilter, Theme, User};
use crate::error::{NotedeckError, Result};
use crate::search;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// Newest public notes.
pub async fn feed(
    _current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NoteView>>> {
    let store = state.store.lock().await;
    Ok(Json(
        store.list_public_notes(&PublicFilter::default(), search::DEFAULT_LIMIT)?,
    ))
}

/// Public notes narrowed by `query` (with `topic:` tokens) and `topic`.
pub async fn explore(
    _current: CurrentUser,
    State(state): State<AppState>,
    Query(params): Query<PublicQuery>,
) -> Result<Json<Value>> {
    let filter = search::build_filter(params.query.as_deref(), params.topic.as_deref());
    let limit = search::clamp_limit(params.limit);

    let notes = {
        let store = state.store.lock().await;
        store.list_public_notes(&filter, limit)?
    };

    Ok(Json(json!({
        "query": params.query,
        "topic": filter.topic,
        "notes": notes,
    })))
}

pub async fn profile(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

pub async fn update_profile(
    current: CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<Json<Value>> {
    let avatar_url = body.avatar_url.as_deref().filter(|url| !url.trim().is_empty());

    let store = state.store.lock().await;
    store.update_profile(current.id(), avatar_url, body.bio.as_deref())?;

    debug!(user_id = current.id(), "Profile updated");
    Ok(Json(json!({ "status": "success" })))
}

pub async fn set_theme(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(theme): Path<String>,
    headers: HeaderMap,
) -> Result<Redirect> {
    let theme: Theme = theme
        .parse()
        .map_err(|_| NotedeckError::InvalidTheme(theme.clone()))?;

    {
        let store = state.store.lock().await;
        store.set_theme(current.id(), theme)?;
    }

    let referer = headers.get(REFERER).and_then(|v| v.to_str().ok());
    let host = headers.get(HOST).and_then(|v| v.to_str().ok());
    Ok(Redirect::to(&return_path(referer, host)))
}

/// Where to send the browser back to: the referring page when it is on this
/// site, `/` otherwise.
fn return_path(referer: Option<&str>, host: Option<&str>) -> String {
    let Some(uri) = referer.and_then(|r| r.parse::<Uri>().ok()) else {
        return "/".to_string();
    };

    let same_site = match uri.authority() {
        Some(authority) => host.is_some_and(|h| h.eq_ignore_ascii_case(authority.as_str())),
        None => uri.scheme().is_none(),
    };
    if !same_site {
        return "/".to_string();
    }

    match uri.path_and_query().map(|pq| pq.as_str()) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}
