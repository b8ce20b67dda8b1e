//! Route definitions for speakers' own talks.

use axum::routing::get;
use axum::Router;

use crate::handlers::talks;
use crate::state::AppState;

/// Routes mounted at `/talks`.
///
/// ```text
/// GET  /   -> list_own
/// POST /   -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(talks::list_own).post(talks::submit))
}
