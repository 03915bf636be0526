//! Request body extractors that reject with [`NotedeckError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::error::{NotedeckError, Result};

/// `Json<T>` whose rejections (wrong content type, malformed body, wrongly
/// typed fields) come back as a JSON 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = NotedeckError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| NotedeckError::BadRequest(e.body_text()))?;
        Ok(ApiJson(value))
    }
}
