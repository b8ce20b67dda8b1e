//! Handlers for speakers' own talk submissions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use opencfp_core::error::CoreError;
use opencfp_core::sanitize::sanitize;
use opencfp_db::models::talk::{CreateTalk, Talk};
use opencfp_db::repositories::TalkRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/talks
///
/// List the talks submitted by the authenticated user.
pub async fn list_own(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Talk>>>> {
    let talks = TalkRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: talks }))
}

/// POST /api/v1/talks
///
/// Submit a talk. Free-text fields are sanitized before storage and the
/// required ones must remain non-blank afterwards.
pub async fn submit(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateTalk>,
) -> AppResult<impl IntoResponse> {
    let cleaned = CreateTalk {
        title: required(&input.title, "title")?,
        description: required(&input.description, "description")?,
        talk_type: required(&input.talk_type, "type")?,
        level: required(&input.level, "level")?,
        category: required(&input.category, "category")?,
        slides: optional(&input.slides),
        other: optional(&input.other),
        sponsor: input.sponsor,
        desired: input.desired,
    };

    let talk = TalkRepo::create(&state.pool, auth.user_id, &cleaned).await?;

    tracing::info!(user_id = auth.user_id, talk_id = talk.id, "Talk submitted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: talk })))
}

fn required(raw: &str, field: &str) -> AppResult<String> {
    let cleaned = sanitize(raw).trim().to_string();
    if cleaned.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Talk {field} cannot be blank"
        ))));
    }
    Ok(cleaned)
}

fn optional(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(|v| sanitize(v).trim().to_string())
        .filter(|v| !v.is_empty())
}
