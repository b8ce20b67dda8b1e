//! Per-reviewer talk metadata.

use opencfp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `talk_meta` table: one reviewer's rating and viewed state
/// for one talk.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalkMeta {
    pub id: DbId,
    pub talk_id: DbId,
    pub admin_user_id: DbId,
    pub rating: i16,
    pub viewed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for rating a talk. The value is range-checked by
/// `opencfp_core::rating::validate_rating`.
#[derive(Debug, Deserialize)]
pub struct RateTalkRequest {
    pub rating: i64,
}
