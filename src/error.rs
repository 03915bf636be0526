use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotedeckError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid theme")]
    InvalidTheme(String),

    #[error("File type not allowed: {0}")]
    DisallowedFileType(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, NotedeckError>;

impl NotedeckError {
    pub fn unauthorized() -> Self {
        NotedeckError::Forbidden("Unauthorized".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            NotedeckError::BadRequest(_)
            | NotedeckError::InvalidTheme(_)
            | NotedeckError::DisallowedFileType(_) => StatusCode::BAD_REQUEST,
            NotedeckError::InvalidCredentials | NotedeckError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            NotedeckError::Forbidden(_) => StatusCode::FORBIDDEN,
            NotedeckError::NotFound(_) => StatusCode::NOT_FOUND,
            NotedeckError::UsernameTaken(_) => StatusCode::CONFLICT,
            NotedeckError::Storage(_)
            | NotedeckError::PasswordHash(_)
            | NotedeckError::Session(_)
            | NotedeckError::Io(_)
            | NotedeckError::Json(_)
            | NotedeckError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NotedeckError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<rusqlite::Error> for NotedeckError {
    fn from(e: rusqlite::Error) -> Self {
        NotedeckError::Storage(format!("SQLite error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            NotedeckError::BadRequest("Missing title".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NotedeckError::InvalidTheme("neon".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(NotedeckError::unauthorized().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            NotedeckError::NotFound("Note 3".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            NotedeckError::UsernameTaken("alice".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            NotedeckError::Storage("disk full".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(NotedeckError::InvalidTheme("neon".into()).to_string(), "Invalid theme");
        assert_eq!(NotedeckError::NotFound("Task 9".into()).to_string(), "Task 9 not found");
        assert_eq!(NotedeckError::unauthorized().to_string(), "Unauthorized");
    }
}
