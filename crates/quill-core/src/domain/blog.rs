use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog entity - the per-user aggregate root that posts belong to.
///
/// Every user owns exactly one blog, created at registration with the
/// username as its title. Titles are globally unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub category: Option<String>,
    pub links: Vec<String>,
    pub author_id: Uuid,
}

impl Blog {
    /// Create a new blog for the given author.
    pub fn new(title: String, author_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            category: None,
            links: Vec::new(),
            author_id,
        }
    }
}
