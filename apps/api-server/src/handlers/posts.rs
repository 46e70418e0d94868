//! Post handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Comment, Post};
use quill_shared::dto::{
    CommentMutationResponse, DeletePostRequest, MessageResponse, NewCommentRequest, PostBody,
    PostMutationResponse, PostResponse, PostsResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::views;

/// Username of each blog's author, keyed by blog id.
async fn author_index(state: &AppState) -> AppResult<HashMap<Uuid, String>> {
    let rows = state.blogs.find_all_with_author().await?;
    Ok(rows
        .into_iter()
        .map(|(blog, author)| (blog.id, author.username))
        .collect())
}

async fn annotate(
    state: &AppState,
    posts: Vec<Post>,
) -> AppResult<Vec<quill_shared::dto::PostView>> {
    let authors = author_index(state).await?;

    let mut out = Vec::with_capacity(posts.len());
    for post in &posts {
        let comments = state.comments.find_by_post(post.id).await?;
        let author = authors.get(&post.blog_id).map(String::as_str).unwrap_or("");
        out.push(views::post_view(post, author, &comments));
    }
    Ok(out)
}

/// The post's owning blog must belong to the caller. Mutation by any
/// other authenticated user is rejected (explicit owner-only policy).
async fn require_owned_post(
    state: &AppState,
    identity: &Identity,
    post_id: Uuid,
) -> AppResult<Post> {
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let blog = state
        .blogs
        .find_by_id(post.blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    if blog.author_id != identity.user_id {
        return Err(AppError::Unauthorized);
    }

    Ok(post)
}

/// GET /posts - every post across all blogs, annotated with its author.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let posts = annotate(&state, posts).await?;

    Ok(HttpResponse::Ok().json(PostsResponse { posts }))
}

/// GET /posts/{param} - a UUID segment fetches a post by id, anything
/// else is a keyword search over title, hashtags, content and comments.
pub async fn get_post_or_search(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let param = path.into_inner();

    if let Ok(id) = Uuid::parse_str(&param) {
        let post = state
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let mut annotated = annotate(&state, vec![post]).await?;
        let post = annotated.remove(0);

        return Ok(HttpResponse::Ok().json(PostResponse { post }));
    }

    let hits = state.posts.search(&param).await?;
    if hits.is_empty() {
        return Err(AppError::NotFound(
            "No posts found with the provided keyword".to_string(),
        ));
    }

    let posts = annotate(&state, hits).await?;
    Ok(HttpResponse::Ok().json(PostsResponse { posts }))
}

/// GET /profile/{username}/posts
pub async fn posts_by_user(
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
        .ok_or_else(|| AppError::NotFound("No posts found for this user".to_string()))?;

    let posts = state.posts.find_by_blog(blog.id).await?;
    if posts.is_empty() {
        return Err(AppError::NotFound(
            "No posts found for this user".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(posts.len());
    for post in &posts {
        let comments = state.comments.find_by_post(post.id).await?;
        out.push(views::post_view(post, &user.username, &comments));
    }

    Ok(HttpResponse::Ok().json(PostsResponse { posts: out }))
}

/// POST /posts/new - append a post to the caller's blog.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostBody>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let blog = state
        .blogs
        .find_by_author(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    let post = Post::new(
        blog.id,
        state.sanitizer.clean_text(&req.title),
        state.sanitizer.clean(&req.content),
        req.hashtags
            .iter()
            .map(|h| state.sanitizer.clean_text(h))
            .collect(),
        req.public.unwrap_or(true),
    );
    let post = state.posts.save(post).await?;

    tracing::info!(author = %identity.username, post_id = %post.id, "Post created");

    Ok(HttpResponse::Created().json(PostMutationResponse {
        message: "Post created successfully".to_string(),
        post: views::post_view(&post, &identity.username, &[]),
    }))
}

/// POST /posts/edit/{id} - full-field overwrite, owner-only.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostBody>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut post = require_owned_post(&state, &identity, path.into_inner()).await?;

    post.title = state.sanitizer.clean_text(&req.title);
    post.content = state.sanitizer.clean(&req.content);
    post.hashtags = req
        .hashtags
        .iter()
        .map(|h| state.sanitizer.clean_text(h))
        .collect();
    post.public = req.public.unwrap_or(true);

    let post = state.posts.save(post).await?;
    let comments = state.comments.find_by_post(post.id).await?;

    Ok(HttpResponse::Ok().json(PostMutationResponse {
        message: "Post updated successfully".to_string(),
        post: views::post_view(&post, &identity.username, &comments),
    }))
}

/// POST /posts/delete/{id} - owner-only; comments go with the post.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    _body: web::Json<DeletePostRequest>,
) -> AppResult<HttpResponse> {
    let post = require_owned_post(&state, &identity, path.into_inner()).await?;

    state.posts.delete(post.id).await?;

    tracing::info!(author = %identity.username, post_id = %post.id, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

/// POST /posts/{id}/comments - append a comment.
///
/// The comment author is the authenticated identity; the body's
/// `username` field is ignored.
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<NewCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let comment = Comment::new(
        post.id,
        identity.username.clone(),
        state.sanitizer.clean_text(&req.text),
    );
    let comment = state.comments.save(comment).await?;

    Ok(HttpResponse::Ok().json(CommentMutationResponse {
        message: "Comment added successfully".to_string(),
        comment: views::comment_view(&comment),
    }))
}
