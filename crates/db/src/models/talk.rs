//! Talk entity model and DTOs.

use opencfp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `talks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Talk {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub talk_type: String,
    pub level: String,
    pub category: String,
    pub slides: Option<String>,
    pub other: Option<String>,
    pub sponsor: bool,
    pub desired: bool,
    pub selected: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a new talk.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTalk {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub talk_type: String,
    pub level: String,
    pub category: String,
    pub slides: Option<String>,
    pub other: Option<String>,
    #[serde(default)]
    pub sponsor: bool,
    #[serde(default)]
    pub desired: bool,
}

/// Request body for toggling a talk's selection.
#[derive(Debug, Deserialize)]
pub struct SelectTalkRequest {
    pub selected: bool,
}
