//! Blog/profile handlers.

use actix_web::{HttpResponse, web};

use quill_core::error::RepoError;
use quill_shared::dto::{
    AuthorView, BlogsResponse, UpdateProfileRequest, UpdateProfileResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validators;

use super::views;

/// GET /profile - all blogs with author username/email populated.
pub async fn list_blogs(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let rows = state.blogs.find_all_with_author().await?;

    let blogs = rows
        .iter()
        .map(|(blog, author)| {
            views::blog_view(
                blog,
                AuthorView {
                    username: author.username.clone(),
                    email: Some(author.email.clone()),
                },
                None,
            )
        })
        .collect();

    Ok(HttpResponse::Ok().json(BlogsResponse { blogs }))
}

/// GET /profile/{username} - a user's blog, posts included.
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let blog = state
        .blogs
        .find_by_author(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    let posts = state.posts.find_by_blog(blog.id).await?;
    let mut post_views = Vec::with_capacity(posts.len());
    for post in &posts {
        let comments = state.comments.find_by_post(post.id).await?;
        post_views.push(views::post_view(post, &user.username, &comments));
    }

    let view = views::blog_view(
        &blog,
        AuthorView {
            username: user.username.clone(),
            email: None,
        },
        Some(post_views),
    );

    Ok(HttpResponse::Ok().json(view))
}

/// POST /profile/{username} - update blog/account settings.
///
/// The authenticated identity must match `userBefore`. A username change
/// that succeeds is not rolled back if the blog update then fails.
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    _path: web::Path<String>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if identity.username != req.user_before {
        return Err(AppError::Unauthorized);
    }

    if !validators::validate_username(&req.new_username) {
        return Err(AppError::BadRequest(
            "Username must be 1-24 characters, alphanumeric or hyphen".to_string(),
        ));
    }

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if user.username != req.new_username {
        user.username = req.new_username.clone();
        user = state.users.save(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                AppError::BadRequest("Username already taken".to_string())
            }
            e => e.into(),
        })?;
    }

    let mut blog = state
        .blogs
        .find_by_author(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    blog.title = state.sanitizer.clean_text(&req.new_title);
    blog.category = req
        .category
        .as_deref()
        .map(|c| state.sanitizer.clean_text(c));
    blog.links = req
        .links
        .iter()
        .map(|l| state.sanitizer.clean_text(l))
        .collect();

    let blog = state.blogs.save(blog).await.map_err(|e| match e {
        RepoError::Constraint(_) => {
            AppError::BadRequest("Blog title already exists".to_string())
        }
        e => e.into(),
    })?;

    tracing::info!(username = %user.username, blog = %blog.title, "Profile updated");

    Ok(HttpResponse::Ok().json(UpdateProfileResponse {
        message: "Blog updated successfully".to_string(),
        updated_blog: views::blog_view(
            &blog,
            AuthorView {
                username: user.username,
                email: None,
            },
            None,
        ),
    }))
}
