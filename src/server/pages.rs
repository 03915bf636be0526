//! Login, registration and the other non-API page routes.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{info, warn};

use super::AppState;
use crate::auth::{self, session};
use crate::error::{NotedeckError, Result};

const LOGIN_FORM: &str = r#"<!doctype html>
<title>Log in</title>
<form method="post" action="/login">
  <input name="username" placeholder="Username" required>
  <input name="password" type="password" placeholder="Password" required>
  <button type="submit">Log in</button>
</form>
<a href="/register">Create an account</a>
"#;

const REGISTER_FORM: &str = r#"<!doctype html>
<title>Register</title>
<form method="post" action="/register">
  <input name="username" placeholder="Username" required>
  <input name="password" type="password" placeholder="Password" required>
  <button type="submit">Register</button>
</form>
<a href="/login">Already have an account?</a>
"#;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn home(session: Session) -> Result<Redirect> {
    if session::user_id(&session).await?.is_some() {
        Ok(Redirect::to("/feed"))
    } else {
        Ok(Redirect::to("/login"))
    }
}

pub async fn login_form() -> Html<&'static str> {
    Html(LOGIN_FORM)
}

pub async fn register_form() -> Html<&'static str> {
    Html(REGISTER_FORM)
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<Redirect> {
    let username = form.username.trim();
    let candidate = {
        let store = state.store.lock().await;
        store.find_user_by_username(username)?
    };

    let user = match auth::check_credentials(candidate, &form.password) {
        Ok(user) => user,
        Err(e) => {
            warn!(username, "Failed login attempt");
            return Err(e);
        }
    };

    session::establish(&session, user.id).await?;
    info!(user_id = user.id, admin = user.is_admin, "User logged in");

    if user.is_admin {
        Ok(Redirect::to("/admin/dashboard"))
    } else {
        Ok(Redirect::to("/feed"))
    }
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<Credentials>,
) -> Result<Redirect> {
    let user = auth::new_account(&form.username, &form.password)?;

    let id = {
        let store = state.store.lock().await;
        if store.find_user_by_username(&user.username)?.is_some() {
            return Err(NotedeckError::UsernameTaken(user.username));
        }
        store.add_user(&user)?
    };

    info!(user_id = id, username = %user.username, "Account created");
    Ok(Redirect::to("/login"))
}

pub async fn logout(session: Session) -> Result<Redirect> {
    if let Some(user_id) = session::user_id(&session).await? {
        info!(user_id, "User logged out");
    }
    session::clear(&session).await?;
    Ok(Redirect::to("/login"))
}
