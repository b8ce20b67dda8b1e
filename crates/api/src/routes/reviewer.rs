//! Route definitions for the reviewer area.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reviewer;
use crate::state::AppState;

/// Routes mounted at `/reviewer/talks`.
///
/// ```text
/// GET    /                -> list_talks
/// GET    /{id}            -> view_talk
/// POST   /{id}/rate       -> rate_talk
/// POST   /{id}/favorite   -> add_favorite
/// DELETE /{id}/favorite   -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviewer::list_talks))
        .route("/{id}", get(reviewer::view_talk))
        .route("/{id}/rate", post(reviewer::rate_talk))
        .route(
            "/{id}/favorite",
            post(reviewer::add_favorite).delete(reviewer::remove_favorite),
        )
}
