//! Well-known role name constants.
//!
//! These must match the seed data in `20240101000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_REVIEWER: &str = "reviewer";
pub const ROLE_SPEAKER: &str = "speaker";

/// Role id assigned to self-registered accounts.
pub const SPEAKER_ROLE_ID: i64 = 3;

/// Whether a role may read, rate, and favorite submitted talks.
pub fn can_review(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_REVIEWER
}
