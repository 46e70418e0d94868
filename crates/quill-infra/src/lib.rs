//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL repositories via SeaORM, JWT + Argon2 authentication,
//! ammonia-based sanitization, and an in-memory store used when no
//! database is configured (and by the HTTP test suite).

pub mod auth;
pub mod database;
pub mod memory;
pub mod sanitize;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConnections;
pub use memory::InMemoryStore;
pub use sanitize::AmmoniaSanitizer;
