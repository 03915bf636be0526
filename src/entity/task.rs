// src/entity/task.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(user_id: i64, description: String, category: String) -> Self {
        Self {
            id: 0,
            user_id,
            description,
            category,
            created_at: Utc::now(),
        }
    }
}
