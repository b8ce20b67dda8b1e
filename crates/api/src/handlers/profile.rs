//! Handlers for the current user's profile (`/me`).

use axum::extract::State;
use axum::Json;
use opencfp_core::error::CoreError;
use opencfp_core::signup::{SignupAction, SignupInput, SignupValidator};
use opencfp_core::types::DbId;
use opencfp_db::models::user::{UpdateProfile, User, UserResponse};
use opencfp_db::repositories::{RoleRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
pub async fn get_me(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = find_user(&state, auth.user_id).await?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, role),
    }))
}

/// PUT /api/v1/me
///
/// Validate the profile form (passwords and code of conduct are not checked)
/// and overwrite the stored profile.
pub async fn update_me(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let validation =
        SignupValidator::new(state.config.has_coc).validate(&input, None, SignupAction::Update);
    if !validation.valid {
        return Err(AppError::FormValidation(validation.errors));
    }

    let email = input.email.clone().unwrap_or_default();
    if let Some(existing) = UserRepo::find_by_email(&state.pool, &email).await? {
        if existing.id != auth.user_id {
            return Err(AppError::Core(CoreError::Conflict(
                "A user already exists with that email address".into(),
            )));
        }
    }

    let update = UpdateProfile {
        email,
        first_name: SignupInput::cleaned(&input.first_name),
        last_name: SignupInput::cleaned(&input.last_name),
        company: SignupInput::cleaned_optional(&input.company),
        twitter: input.cleaned_twitter().filter(|t| !t.is_empty()),
        url: SignupInput::cleaned_optional(&input.url),
        speaker_info: SignupInput::cleaned_optional(&input.speaker_info),
        speaker_bio: SignupInput::cleaned_optional(&input.speaker_bio),
    };

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, role),
    }))
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
