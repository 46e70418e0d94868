//! SeaORM entities for the Quill schema.

pub mod blog;
pub mod comment;
pub mod post;
pub mod user;
