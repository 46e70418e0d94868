//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    BlogRepository, CommentRepository, PostRepository, Sanitizer, UserRepository,
};
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, PostgresBlogRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresUserRepository,
};
use quill_infra::{AmmoniaSanitizer, InMemoryStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub sanitizer: Arc<dyn Sanitizer>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        if let Some(config) = db_config {
            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    // One pooled connection shared across the repositories.
                    let db = Arc::new(connections.main);
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(db.clone())),
                        blogs: Arc::new(PostgresBlogRepository::new(db.clone())),
                        posts: Arc::new(PostgresPostRepository::new(db.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(db)),
                        sanitizer: Arc::new(AmmoniaSanitizer::new()),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using the in-memory store.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
        }

        Self::in_memory()
    }

    /// State backed entirely by the in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();

        Self {
            users: Arc::new(store.clone()),
            blogs: Arc::new(store.clone()),
            posts: Arc::new(store.clone()),
            comments: Arc::new(store),
            sanitizer: Arc::new(AmmoniaSanitizer::new()),
        }
    }
}
