//! Data Transfer Objects - request/response types for the API.
//!
//! Field names match what existing clients send and expect (camelCase
//! where applicable, e.g. `confirmPassword`, `userId`, `newTitle`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user. POST /auth/new
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request to login. POST /auth/in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying only a message (health, deletes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub join_date: DateTime<Utc>,
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserView,
    pub token: String,
}

/// Response to a token check. GET /auth/check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub message: String,
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

/// Blog author as embedded in blog views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorView {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A comment as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub username: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A post as returned to clients, annotated with its author's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub hashtags: Vec<String>,
    pub content: String,
    pub public: bool,
    pub author: String,
    pub comments: Vec<CommentView>,
}

/// A blog as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogView {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub links: Vec<String>,
    pub author: AuthorView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostView>>,
}

/// Envelope for blog listings. GET /profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogsResponse {
    pub blogs: Vec<BlogView>,
}

/// Envelope for post listings and search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<PostView>,
}

/// Envelope for a single post. GET /posts/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub post: PostView,
}

/// Envelope for a mutated post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMutationResponse {
    pub message: String,
    pub post: PostView,
}

/// Request to update blog/account settings. POST /profile/{username}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub new_title: String,
    pub user_before: String,
    pub new_username: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Response to a profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub message: String,
    pub updated_blog: BlogView,
}

/// Request to create or edit a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostBody {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Defaults to true when absent.
    #[serde(default)]
    pub public: Option<bool>,
}

/// Request to delete a post. POST /posts/delete/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostRequest {
    pub username: String,
    pub title: String,
}

/// Request to comment on a post. POST /posts/{id}/comments
///
/// The `username` field is accepted for wire compatibility but the comment
/// author is always the authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub text: String,
}

/// Response to a comment append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentMutationResponse {
    pub message: String,
    pub comment: CommentView,
}
