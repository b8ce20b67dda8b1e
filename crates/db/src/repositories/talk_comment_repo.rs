//! Repository for the `talk_comments` table.

use opencfp_core::types::DbId;
use sqlx::PgPool;

use crate::models::talk_comment::TalkComment;

const COLUMNS: &str = "id, talk_id, user_id, comment, created_at";

/// Provides insert and per-talk listing of comments.
pub struct TalkCommentRepo;

impl TalkCommentRepo {
    /// Store a comment by `user_id` on `talk_id`. The text is expected to be sanitized.
    pub async fn create(
        pool: &PgPool,
        talk_id: DbId,
        user_id: DbId,
        comment: &str,
    ) -> Result<TalkComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO talk_comments (talk_id, user_id, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TalkComment>(&query)
            .bind(talk_id)
            .bind(user_id)
            .bind(comment)
            .fetch_one(pool)
            .await
    }

    /// All comments on a talk, oldest first.
    pub async fn list_for_talk(
        pool: &PgPool,
        talk_id: DbId,
    ) -> Result<Vec<TalkComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM talk_comments WHERE talk_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, TalkComment>(&query)
            .bind(talk_id)
            .fetch_all(pool)
            .await
    }
}
