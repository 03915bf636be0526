//! Session keys and login/logout transitions.

use tower_sessions::Session;

use crate::error::Result;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Bind the session to `user_id`, issuing a fresh session id.
pub async fn establish(session: &Session, user_id: i64) -> Result<()> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user_id).await?;
    Ok(())
}

/// The user id bound to this session, if any.
pub async fn user_id(session: &Session) -> Result<Option<i64>> {
    Ok(session.get::<i64>(SESSION_USER_ID_KEY).await?)
}

/// Drop all session data and the session cookie.
pub async fn clear(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}
