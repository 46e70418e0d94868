use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - represents a registered account.
///
/// `username` and `email` are unique across the system; uniqueness is
/// enforced by the storage layer, not by a pre-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub join_date: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and join date.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            join_date: Utc::now(),
        }
    }
}
