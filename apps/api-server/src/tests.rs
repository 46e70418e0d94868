//! HTTP-level tests against the in-memory store.

use actix_web::{App, test, web};
use std::sync::Arc;

use quill_core::ports::{PasswordService, TokenService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quill_shared::dto::{
    AuthResponse, BlogView, LoginResponse, PostMutationResponse, PostResponse, PostsResponse,
};

use crate::handlers;
use crate::state::AppState;

fn services() -> (AppState, Arc<dyn TokenService>, Arc<dyn PasswordService>) {
    let state = AppState::in_memory();
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: 1,
        issuer: "test-issuer".to_string(),
    }));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    (state, token_service, password_service)
}

macro_rules! init_app {
    ($state:expr, $tokens:expr, $passwords:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($tokens.clone()))
                .app_data(web::Data::new($passwords.clone()))
                .configure(handlers::configure_routes),
        )
        .await
    };
}

fn register_body(username: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "email": email,
        "password": "long enough password",
        "confirmPassword": "long enough password",
    })
}

macro_rules! register {
    ($app:expr, $username:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/auth/new")
            .set_json(register_body($username, $email))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 201);

        let body: AuthResponse = test::read_body_json(resp).await;
        body.token
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn health_returns_ok() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn duplicate_email_registration_is_rejected() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    register!(app, "first", "shared@example.com");

    let req = test::TestRequest::post()
        .uri("/auth/new")
        .set_json(register_body("second", "shared@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // First user's data unaffected: login still works.
    let req = test::TestRequest::post()
        .uri("/auth/in")
        .set_json(serde_json::json!({
            "email": "shared@example.com",
            "password": "long enough password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: LoginResponse = test::read_body_json(resp).await;
    assert_eq!(body.user.username, "first");
}

#[actix_web::test]
async fn registration_creates_blog_with_default_post() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    register!(app, "fresh", "fresh@example.com");

    let req = test::TestRequest::get().uri("/profile/fresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let blog: BlogView = test::read_body_json(resp).await;
    assert_eq!(blog.title, "fresh");
    let posts = blog.posts.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello, World!");
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    register!(app, "marion", "marion@example.com");

    let req = test::TestRequest::post()
        .uri("/auth/in")
        .set_json(serde_json::json!({
            "email": "marion@example.com",
            "password": "not the password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn login_with_unknown_email_is_not_found() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let req = test::TestRequest::post()
        .uri("/auth/in")
        .set_json(serde_json::json!({
            "email": "nobody@example.com",
            "password": "long enough password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn issued_token_passes_check() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let token = register!(app, "marion", "marion@example.com");

    let req = test::TestRequest::get()
        .uri("/auth/check")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "marion");
    assert_eq!(body["token"], token);
}

#[actix_web::test]
async fn expired_token_is_rejected_by_check() {
    let (state, _, passwords) = services();
    // An issuer whose tokens are already an hour past expiry.
    let expired: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: -1,
        issuer: "test-issuer".to_string(),
    }));
    let app = init_app!(state, expired, passwords);

    let token = expired
        .generate_token(uuid::Uuid::new_v4(), "marion")
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/auth/check")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn unauthenticated_post_creation_does_not_mutate() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    register!(app, "marion", "marion@example.com");

    let req = test::TestRequest::post()
        .uri("/posts/new")
        .set_json(serde_json::json!({
            "title": "Sneaky",
            "content": "Should not land",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // Still only the default post.
    let req = test::TestRequest::get()
        .uri("/profile/marion/posts")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: PostsResponse = test::read_body_json(resp).await;
    assert_eq!(body.posts.len(), 1);
    assert_eq!(body.posts[0].title, "Hello, World!");
}

#[actix_web::test]
async fn keyword_in_comment_text_finds_the_post() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let token = register!(app, "marion", "marion@example.com");

    let req = test::TestRequest::post()
        .uri("/posts/new")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({
            "title": "Quiet title",
            "content": "Quiet content",
            "hashtags": ["quiet"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: PostMutationResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comments", created.post.id))
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({
            "username": "marion",
            "text": "zanzibar only appears here",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get().uri("/posts/zanzibar").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: PostsResponse = test::read_body_json(resp).await;
    assert_eq!(body.posts.len(), 1);
    assert_eq!(body.posts[0].id, created.post.id);
}

#[actix_web::test]
async fn search_with_no_matches_is_not_found() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    register!(app, "marion", "marion@example.com");

    let req = test::TestRequest::get().uri("/posts/xyzzy").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn deleted_post_is_gone_on_fetch() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let token = register!(app, "marion", "marion@example.com");

    let req = test::TestRequest::post()
        .uri("/posts/new")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({
            "title": "Ephemeral",
            "content": "Soon gone",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: PostMutationResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/delete/{}", created.post.id))
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({
            "username": "marion",
            "title": "Ephemeral",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", created.post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn post_mutation_by_non_owner_is_unauthorized() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let owner = register!(app, "owner", "owner@example.com");
    let other = register!(app, "other", "other@example.com");

    let req = test::TestRequest::post()
        .uri("/posts/new")
        .insert_header(bearer(&owner))
        .set_json(serde_json::json!({
            "title": "Mine",
            "content": "Owned content",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: PostMutationResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/edit/{}", created.post.id))
        .insert_header(bearer(&other))
        .set_json(serde_json::json!({
            "title": "Hijacked",
            "content": "Not yours",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // Unchanged.
    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", created.post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: PostResponse = test::read_body_json(resp).await;
    assert_eq!(body.post.title, "Mine");
}

#[actix_web::test]
async fn username_update_to_taken_name_is_rejected() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let token_a = register!(app, "alpha", "alpha@example.com");
    register!(app, "beta", "beta@example.com");

    let req = test::TestRequest::post()
        .uri("/profile/alpha")
        .insert_header(bearer(&token_a))
        .set_json(serde_json::json!({
            "newTitle": "alpha's place",
            "userBefore": "alpha",
            "newUsername": "beta",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Original username unchanged.
    let req = test::TestRequest::get().uri("/profile/alpha").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn profile_update_changes_username_and_blog() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let token = register!(app, "alpha", "alpha@example.com");

    let req = test::TestRequest::post()
        .uri("/profile/alpha")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({
            "newTitle": "Alpha Writes <script>alert(1)</script>",
            "userBefore": "alpha",
            "newUsername": "alpha-prime",
            "category": "engineering",
            "links": ["https://example.com/alpha"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    // Sanitized at the write boundary.
    assert_eq!(body["updatedBlog"]["title"], "Alpha Writes ");
    assert_eq!(body["updatedBlog"]["author"]["username"], "alpha-prime");

    let req = test::TestRequest::get()
        .uri("/profile/alpha-prime")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn update_profile_requires_matching_identity() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    register!(app, "alpha", "alpha@example.com");
    let token_b = register!(app, "beta", "beta@example.com");

    let req = test::TestRequest::post()
        .uri("/profile/alpha")
        .insert_header(bearer(&token_b))
        .set_json(serde_json::json!({
            "newTitle": "Taken over",
            "userBefore": "alpha",
            "newUsername": "alpha",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn comment_author_is_the_authenticated_identity() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    let token = register!(app, "marion", "marion@example.com");

    let req = test::TestRequest::post()
        .uri("/posts/new")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({
            "title": "Commentable",
            "content": "body",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: PostMutationResponse = test::read_body_json(resp).await;

    // Claimed username on the wire is ignored.
    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comments", created.post.id))
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({
            "username": "impostor",
            "text": "nice post",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["comment"]["username"], "marion");
}

#[actix_web::test]
async fn invalid_registration_input_is_rejected() {
    let (state, tokens, passwords) = services();
    let app = init_app!(state, tokens, passwords);

    // Mismatched passwords
    let req = test::TestRequest::post()
        .uri("/auth/new")
        .set_json(serde_json::json!({
            "username": "ok-name",
            "email": "ok@example.com",
            "password": "long enough password",
            "confirmPassword": "different password",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // Short password
    let req = test::TestRequest::post()
        .uri("/auth/new")
        .set_json(serde_json::json!({
            "username": "ok-name",
            "email": "ok@example.com",
            "password": "short",
            "confirmPassword": "short",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // Bad username shape
    let req = test::TestRequest::post()
        .uri("/auth/new")
        .set_json(serde_json::json!({
            "username": "not ok name!",
            "email": "ok@example.com",
            "password": "long enough password",
            "confirmPassword": "long enough password",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}
