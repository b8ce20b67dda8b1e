//! Route definitions for admin-only talk actions.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin/talks`.
///
/// ```text
/// POST /{id}/select   -> select_talk
/// POST /{id}/comments -> comment_on_talk
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/select", post(admin::select_talk))
        .route("/{id}/comments", post(admin::comment_on_talk))
}
