//! Admin comments on talks.

use opencfp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `talk_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalkComment {
    pub id: DbId,
    pub talk_id: DbId,
    pub user_id: DbId,
    pub comment: String,
    pub created_at: Timestamp,
}

/// Request body for commenting on a talk.
#[derive(Debug, Deserialize)]
pub struct CreateTalkComment {
    pub comment: String,
}
