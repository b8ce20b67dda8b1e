//! Handlers for the `/auth` resource (signup, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use opencfp_core::error::CoreError;
use opencfp_core::roles::{ROLE_SPEAKER, SPEAKER_ROLE_ID};
use opencfp_core::signup::{SignupAction, SignupInput, SignupValidator};
use opencfp_db::models::user::{CreateUser, UserResponse};
use opencfp_db::repositories::{RoleRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Validate the signup form and create a speaker account.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> AppResult<impl IntoResponse> {
    let validation =
        SignupValidator::new(state.config.has_coc).validate(&input, None, SignupAction::Create);
    if !validation.valid {
        return Err(AppError::FormValidation(validation.errors));
    }

    let email = input.email.clone().unwrap_or_default();
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "A user already exists with that email address".into(),
        )));
    }

    let password = input.password.as_deref().unwrap_or_default();
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        email,
        password_hash,
        first_name: SignupInput::cleaned(&input.first_name),
        last_name: SignupInput::cleaned(&input.last_name),
        company: SignupInput::cleaned_optional(&input.company),
        twitter: input.cleaned_twitter().filter(|t| !t.is_empty()),
        url: SignupInput::cleaned_optional(&input.url),
        speaker_info: SignupInput::cleaned_optional(&input.speaker_info),
        speaker_bio: SignupInput::cleaned_optional(&input.speaker_bio),
        role_id: SPEAKER_ROLE_ID,
    };

    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, "Speaker account created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from_user(user, ROLE_SPEAKER.to_string()),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let access_token = generate_access_token(user.id, &role_name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %role_name, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from_user(user, role_name),
    }))
}
