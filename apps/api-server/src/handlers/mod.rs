//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod profile;
mod views;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/new", web::post().to(auth::register))
                .route("/in", web::post().to(auth::login))
                .route("/check", web::get().to(auth::check)),
        )
        .service(
            web::scope("/profile")
                .route("", web::get().to(profile::list_blogs))
                .route("/{username}/posts", web::get().to(posts::posts_by_user))
                .route("/{username}", web::get().to(profile::get_blog))
                .route("/{username}", web::post().to(profile::update_profile)),
        )
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("/new", web::post().to(posts::create_post))
                .route("/edit/{id}", web::post().to(posts::update_post))
                .route("/delete/{id}", web::post().to(posts::delete_post))
                .route("/{id}/comments", web::post().to(posts::add_comment))
                // A UUID segment is a post-id lookup, anything else a search.
                .route("/{param}", web::get().to(posts::get_post_or_search)),
        );
}
