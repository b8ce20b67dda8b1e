//! Route definitions for the reviewer speaker directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::speakers;
use crate::state::AppState;

/// Routes mounted at `/reviewer/speakers`.
///
/// ```text
/// GET /       -> list_speakers
/// GET /{id}   -> view_speaker
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(speakers::list_speakers))
        .route("/{id}", get(speakers::view_speaker))
}
