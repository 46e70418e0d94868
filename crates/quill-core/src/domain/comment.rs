use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - append-only; there is no edit or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment with a server-generated timestamp.
    pub fn new(post_id: Uuid, username: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            username,
            text,
            created_at: Utc::now(),
        }
    }
}
