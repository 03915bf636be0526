//! Accounts, credentials and request identity.
//!
//! [`CurrentUser`] resolves the logged-in user from the session for any
//! handler that needs one. [`require_admin`] guards whole routers behind the
//! admin flag and hands the checked [`AdminUser`] to handlers as a request
//! extension.

pub mod password;
pub mod session;

use axum::extract::{FromRef, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;
use tracing::debug;

use crate::entity::User;
use crate::error::{NotedeckError, Result};
use crate::server::AppState;

/// Validate registration input and build an unsaved account.
pub fn new_account(username: &str, password: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(NotedeckError::BadRequest("Username is required".to_string()));
    }
    if password.is_empty() {
        return Err(NotedeckError::BadRequest("Password is required".to_string()));
    }

    let hash = password::hash_password(password)?;
    Ok(User::new(username.to_string(), hash))
}

/// Check a password against the account looked up for a login attempt.
/// Unknown users and wrong passwords fail the same way.
pub fn check_credentials(candidate: Option<User>, password: &str) -> Result<User> {
    let user = candidate.ok_or(NotedeckError::InvalidCredentials)?;
    if password::verify_password(password, &user.password_hash)? {
        Ok(user)
    } else {
        Err(NotedeckError::InvalidCredentials)
    }
}

/// The authenticated user behind a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session: Session,
}

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = NotedeckError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| NotedeckError::Internal(msg.to_string()))?;

        let user_id = session::user_id(&session)
            .await?
            .ok_or(NotedeckError::Unauthenticated)?;

        let app = AppState::from_ref(state);
        let user = {
            let store = app.store.lock().await;
            store.get_user(user_id)?
        };

        match user {
            Some(user) => Ok(CurrentUser { user, session }),
            None => {
                debug!(user_id, "Session refers to a deleted user");
                session::clear(&session).await?;
                Err(NotedeckError::Unauthenticated)
            }
        }
    }
}

/// A [`CurrentUser`] whose admin flag has been checked.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl AdminUser {
    pub fn id(&self) -> i64 {
        self.0.id()
    }
}

impl TryFrom<CurrentUser> for AdminUser {
    type Error = NotedeckError;

    fn try_from(current: CurrentUser) -> Result<Self> {
        if current.is_admin() {
            Ok(AdminUser(current))
        } else {
            Err(NotedeckError::Forbidden("Admin access required".to_string()))
        }
    }
}

/// Middleware for the admin router: anonymous requests get 401, non-admins
/// get 403, admins continue with an [`AdminUser`] extension.
pub async fn require_admin(
    current: CurrentUser,
    mut request: Request,
    next: Next,
) -> std::result::Result<Response, NotedeckError> {
    let admin = AdminUser::try_from(current)?;
    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}
