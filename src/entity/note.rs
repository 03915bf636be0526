// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub image_filename: Option<String>,
    pub topic: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(user_id: i64, title: String, content: String) -> Self {
        Self {
            id: 0,
            user_id,
            title,
            content,
            image_filename: None,
            topic: None,
            is_public: false,
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` may read this note.
    pub fn visible_to(&self, user_id: i64) -> bool {
        self.is_public || self.user_id == user_id
    }
}

/// A note as shown in listings, with its author and net vote score.
#[derive(Debug, Clone, Serialize)]
pub struct NoteView {
    #[serde(flatten)]
    pub note: Note,
    pub author: String,
    pub score: i64,
}

/// Filter for the public feed and explore listings.
#[derive(Debug, Default, Clone)]
pub struct PublicFilter {
    /// Case-insensitive substring matched against title or content
    pub text: Option<String>,
    pub topic: Option<String>,
}
