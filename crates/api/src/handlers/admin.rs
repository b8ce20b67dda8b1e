//! Admin-only talk actions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use opencfp_core::error::CoreError;
use opencfp_core::sanitize::sanitize;
use opencfp_core::types::DbId;
use opencfp_db::models::talk::{SelectTalkRequest, Talk};
use opencfp_db::models::talk_comment::CreateTalkComment;
use opencfp_db::repositories::{TalkCommentRepo, TalkRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::reviewer::ensure_talk_exists;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/talks/{id}/select
///
/// Set or clear the talk's selection flag.
pub async fn select_talk(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(talk_id): Path<DbId>,
    Json(input): Json<SelectTalkRequest>,
) -> AppResult<Json<DataResponse<Talk>>> {
    let talk = TalkRepo::set_selected(&state.pool, talk_id, input.selected)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Talk",
            id: talk_id,
        }))?;

    tracing::info!(
        user_id = admin.user_id,
        talk_id,
        selected = input.selected,
        "Talk selection changed"
    );

    Ok(Json(DataResponse { data: talk }))
}

/// POST /api/v1/admin/talks/{id}/comments
///
/// Attach a comment to a talk. The text is sanitized and must not be blank
/// afterwards.
pub async fn comment_on_talk(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(talk_id): Path<DbId>,
    Json(input): Json<CreateTalkComment>,
) -> AppResult<impl IntoResponse> {
    ensure_talk_exists(&state.pool, talk_id).await?;

    let comment = sanitize(&input.comment).trim().to_string();
    if comment.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment cannot be blank".into(),
        )));
    }

    let created = TalkCommentRepo::create(&state.pool, talk_id, admin.user_id, &comment).await?;

    tracing::info!(
        user_id = admin.user_id,
        talk_id,
        comment_id = created.id,
        "Talk commented on"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
