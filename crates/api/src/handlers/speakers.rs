//! Handlers for the reviewer speaker directory.

use axum::extract::{Path, Query, State};
use axum::Json;
use opencfp_core::error::CoreError;
use opencfp_core::types::DbId;
use opencfp_db::models::talk::Talk;
use opencfp_db::models::user::{SpeakerSummary, UserResponse};
use opencfp_db::repositories::{RoleRepo, TalkRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireReviewer;
use crate::query::SpeakerListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A speaker's profile together with every talk they submitted.
#[derive(Debug, Serialize)]
pub struct SpeakerDetail {
    pub speaker: UserResponse,
    pub talks: Vec<Talk>,
}

/// GET /api/v1/reviewer/speakers
///
/// Search by name or company. Unknown `order_by` / `order` values fall back
/// to `first_name ASC`.
pub async fn list_speakers(
    RequireReviewer(_auth): RequireReviewer,
    State(state): State<AppState>,
    Query(params): Query<SpeakerListParams>,
) -> AppResult<Json<DataResponse<Vec<SpeakerSummary>>>> {
    let speakers = UserRepo::search(&state.pool, &params.speaker_search()).await?;
    Ok(Json(DataResponse { data: speakers }))
}

/// GET /api/v1/reviewer/speakers/{id}
pub async fn view_speaker(
    RequireReviewer(_auth): RequireReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SpeakerDetail>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Speaker",
            id,
        }))?;

    let talks = TalkRepo::list_by_user(&state.pool, user.id).await?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    Ok(Json(DataResponse {
        data: SpeakerDetail {
            speaker: UserResponse::from_user(user, role),
            talks,
        },
    }))
}
