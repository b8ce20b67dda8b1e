pub mod admin;
pub mod auth;
pub mod health;
pub mod reviewer;
pub mod speakers;
pub mod talks;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                          signup (public)
/// /auth/login                           login (public)
///
/// /me                                   get, update own profile
///
/// /talks                                list own, submit
///
/// /reviewer/talks                       listing (reviewer or admin)
/// /reviewer/talks/{id}                  view (marks viewed)
/// /reviewer/talks/{id}/rate             rate (POST)
/// /reviewer/talks/{id}/favorite         favorite (POST), unfavorite (DELETE)
///
/// /reviewer/speakers                    speaker directory search
/// /reviewer/speakers/{id}               speaker profile with talks
///
/// /admin/talks/{id}/select              select / deselect (admin only)
/// /admin/talks/{id}/comments            comment (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route(
            "/me",
            get(handlers::profile::get_me).put(handlers::profile::update_me),
        )
        .nest("/talks", talks::router())
        .nest("/reviewer/talks", reviewer::router())
        .nest("/reviewer/speakers", speakers::router())
        .nest("/admin/talks", admin::router())
}
