//! Handlers for the reviewer talk area: listings, viewing, rating and favorites.
//!
//! Every handler acts on behalf of the authenticated reviewer; meta rows and
//! favorites belonging to other reviewers are never read or written.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use opencfp_core::error::CoreError;
use opencfp_core::rating::validate_rating;
use opencfp_core::talk_query::TalkListing;
use opencfp_core::types::DbId;
use opencfp_db::formatter::FormattedTalk;
use opencfp_db::models::talk::Talk;
use opencfp_db::models::talk_comment::TalkComment;
use opencfp_db::models::talk_meta::{RateTalkRequest, TalkMeta};
use opencfp_db::repositories::{FavoriteRepo, TalkCommentRepo, TalkMetaRepo, TalkRepo};
use opencfp_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireReviewer;
use crate::query::TalkListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A single talk as shown to a reviewer: the formatted talk plus every
/// admin comment on it, oldest first.
#[derive(Debug, Serialize)]
pub struct TalkDetail {
    #[serde(flatten)]
    pub talk: FormattedTalk,
    pub comments: Vec<TalkComment>,
}

/// GET /api/v1/reviewer/talks
///
/// Run one of the fixed listings (or the column-filtered listing when
/// `column` is given) and format every row for the requesting reviewer.
pub async fn list_talks(
    RequireReviewer(auth): RequireReviewer,
    State(state): State<AppState>,
    Query(params): Query<TalkListParams>,
) -> AppResult<Json<DataResponse<Vec<FormattedTalk>>>> {
    let listing = match params.column.as_deref() {
        Some(column) => {
            TalkListing::filtered_by(column, params.value.clone().unwrap_or_default())?
        }
        None => TalkListing::from_filter(params.filter.as_deref(), params.limit),
    };

    let talks = TalkRepo::list_formatted(
        &state.pool,
        &listing,
        auth.user_id,
        &params.sort_request(),
        false,
    )
    .await?;

    Ok(Json(DataResponse { data: talks }))
}

/// GET /api/v1/reviewer/talks/{id}
///
/// Return one talk with submitter details and admin comments, and mark it
/// viewed for the reviewer.
pub async fn view_talk(
    RequireReviewer(auth): RequireReviewer,
    State(state): State<AppState>,
    Path(talk_id): Path<DbId>,
) -> AppResult<Json<DataResponse<TalkDetail>>> {
    let talk = ensure_talk_exists(&state.pool, talk_id).await?;
    TalkMetaRepo::mark_viewed(&state.pool, talk_id, auth.user_id).await?;

    tracing::debug!(user_id = auth.user_id, talk_id, "Talk viewed");

    let talk = TalkRepo::format_one(&state.pool, &talk, auth.user_id).await?;
    let comments = TalkCommentRepo::list_for_talk(&state.pool, talk_id).await?;
    Ok(Json(DataResponse {
        data: TalkDetail { talk, comments },
    }))
}

/// POST /api/v1/reviewer/talks/{id}/rate
pub async fn rate_talk(
    RequireReviewer(auth): RequireReviewer,
    State(state): State<AppState>,
    Path(talk_id): Path<DbId>,
    Json(input): Json<RateTalkRequest>,
) -> AppResult<Json<DataResponse<TalkMeta>>> {
    let rating = validate_rating(input.rating).map_err(AppError::BadRequest)?;
    ensure_talk_exists(&state.pool, talk_id).await?;

    let meta = TalkMetaRepo::upsert_rating(&state.pool, talk_id, auth.user_id, rating).await?;

    tracing::info!(user_id = auth.user_id, talk_id, rating, "Talk rated");

    Ok(Json(DataResponse { data: meta }))
}

/// POST /api/v1/reviewer/talks/{id}/favorite
///
/// Idempotent: favoriting an already-favorited talk is not an error.
pub async fn add_favorite(
    RequireReviewer(auth): RequireReviewer,
    State(state): State<AppState>,
    Path(talk_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_talk_exists(&state.pool, talk_id).await?;
    let created = FavoriteRepo::add(&state.pool, talk_id, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, talk_id, created, "Talk favorited");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/reviewer/talks/{id}/favorite
pub async fn remove_favorite(
    RequireReviewer(auth): RequireReviewer,
    State(state): State<AppState>,
    Path(talk_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = FavoriteRepo::remove(&state.pool, talk_id, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, talk_id, removed, "Talk unfavorited");

    Ok(StatusCode::NO_CONTENT)
}

/// Load a talk or return 404.
pub(crate) async fn ensure_talk_exists(pool: &DbPool, talk_id: DbId) -> AppResult<Talk> {
    TalkRepo::find_by_id(pool, talk_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Talk",
            id: talk_id,
        }))
}
