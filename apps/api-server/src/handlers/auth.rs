//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::{Blog, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::dto::{AuthResponse, CheckResponse, LoginRequest, LoginResponse, RegisterRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validators;

use super::views;

const DEFAULT_POST_TITLE: &str = "Hello, World!";
const DEFAULT_POST_CONTENT: &str = "This is the default post for new users.";

/// POST /auth/new
///
/// Registers a user and creates their blog with a default post. There is
/// no rollback: a blog-save failure after the user row is written leaves
/// the user in place and surfaces as a 500.
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.password != req.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !validators::validate_username(&req.username) {
        return Err(AppError::BadRequest(
            "Username must be 1-24 characters, alphanumeric or hyphen".to_string(),
        ));
    }
    if !validators::validate_email(&req.email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // The unique indexes on username and email are the duplicate check.
    let user = User::new(req.username.clone(), req.email.clone(), password_hash);
    let user = state.users.save(user).await.map_err(|e| match e {
        RepoError::Constraint(_) => {
            AppError::BadRequest("User already exists with this email or username".to_string())
        }
        e => e.into(),
    })?;

    let blog = state.blogs.save(Blog::new(user.username.clone(), user.id)).await?;

    state
        .posts
        .save(Post::new(
            blog.id,
            DEFAULT_POST_TITLE.to_string(),
            DEFAULT_POST_CONTENT.to_string(),
            Vec::new(),
            false,
        ))
        .await?;

    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(username = %user.username, "User registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User created successfully".to_string(),
        token,
    }))
}

/// POST /auth/in
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        user: views::user_view(&user),
        token,
    }))
}

/// GET /auth/check - verifies the presented bearer token.
pub async fn check(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(CheckResponse {
        message: "Token valid".to_string(),
        token: identity.token,
        user_id: identity.user_id,
        username: identity.username,
    }))
}
