//! Repository for the `talk_meta` table.
//!
//! Rows are created lazily: the first rating or view by a reviewer inserts
//! the row, later calls update it in place.

use opencfp_core::types::DbId;
use sqlx::PgPool;

use crate::models::talk_meta::TalkMeta;

const COLUMNS: &str = "id, talk_id, admin_user_id, rating, viewed, created_at, updated_at";

/// Provides upserts and lookups for per-reviewer talk state.
pub struct TalkMetaRepo;

impl TalkMetaRepo {
    /// Record a reviewer's rating for a talk, creating the row if needed.
    pub async fn upsert_rating(
        pool: &PgPool,
        talk_id: DbId,
        admin_user_id: DbId,
        rating: i16,
    ) -> Result<TalkMeta, sqlx::Error> {
        let query = format!(
            "INSERT INTO talk_meta (talk_id, admin_user_id, rating)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_talk_meta_talk_admin
             DO UPDATE SET rating = EXCLUDED.rating
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TalkMeta>(&query)
            .bind(talk_id)
            .bind(admin_user_id)
            .bind(rating)
            .fetch_one(pool)
            .await
    }

    /// Mark a talk as viewed by a reviewer, creating the row if needed.
    pub async fn mark_viewed(
        pool: &PgPool,
        talk_id: DbId,
        admin_user_id: DbId,
    ) -> Result<TalkMeta, sqlx::Error> {
        let query = format!(
            "INSERT INTO talk_meta (talk_id, admin_user_id, viewed)
             VALUES ($1, $2, TRUE)
             ON CONFLICT ON CONSTRAINT uq_talk_meta_talk_admin
             DO UPDATE SET viewed = TRUE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TalkMeta>(&query)
            .bind(talk_id)
            .bind(admin_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find one reviewer's row for a talk.
    pub async fn find(
        pool: &PgPool,
        talk_id: DbId,
        admin_user_id: DbId,
    ) -> Result<Option<TalkMeta>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM talk_meta WHERE talk_id = $1 AND admin_user_id = $2");
        sqlx::query_as::<_, TalkMeta>(&query)
            .bind(talk_id)
            .bind(admin_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load one reviewer's rows for a batch of talks.
    pub async fn list_for_admin(
        pool: &PgPool,
        admin_user_id: DbId,
        talk_ids: &[DbId],
    ) -> Result<Vec<TalkMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM talk_meta WHERE admin_user_id = $1 AND talk_id = ANY($2)"
        );
        sqlx::query_as::<_, TalkMeta>(&query)
            .bind(admin_user_id)
            .bind(talk_ids)
            .fetch_all(pool)
            .await
    }
}
