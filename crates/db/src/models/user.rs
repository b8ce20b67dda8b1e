//! User entity model and DTOs.

use opencfp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub twitter: Option<String>,
    pub url: Option<String>,
    pub speaker_info: Option<String>,
    pub speaker_bio: Option<String>,
    pub role_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub twitter: Option<String>,
    pub url: Option<String>,
    pub speaker_info: Option<String>,
    pub speaker_bio: Option<String>,
    /// Resolved role name (e.g. `"admin"`, `"speaker"`).
    pub role: String,
    pub created_at: Timestamp,
}

impl UserResponse {
    pub fn from_user(user: User, role: String) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            company: user.company,
            twitter: user.twitter,
            url: user.url,
            speaker_info: user.speaker_info,
            speaker_bio: user.speaker_bio,
            role,
            created_at: user.created_at,
        }
    }
}

/// Submitter details embedded in formatted talks.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SpeakerSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub twitter: Option<String>,
}

/// DTO for creating a new user. Text fields are expected to be sanitized.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub twitter: Option<String>,
    pub url: Option<String>,
    pub speaker_info: Option<String>,
    pub speaker_bio: Option<String>,
    pub role_id: DbId,
}

/// DTO for a profile update. Every field is overwritten.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub twitter: Option<String>,
    pub url: Option<String>,
    pub speaker_info: Option<String>,
    pub speaker_bio: Option<String>,
}
