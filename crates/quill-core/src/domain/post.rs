use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog post. Has exactly one owning blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub title: String,
    pub content: String,
    pub hashtags: Vec<String>,
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post in the given blog.
    pub fn new(
        blog_id: Uuid,
        title: String,
        content: String,
        hashtags: Vec<String>,
        public: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            blog_id,
            title,
            content,
            hashtags,
            public,
            created_at: Utc::now(),
        }
    }
}
