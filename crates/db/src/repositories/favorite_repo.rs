//! Repository for the `favorites` table.

use opencfp_core::types::DbId;
use sqlx::PgPool;

/// Provides add/remove/lookup for reviewer favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Favorite a talk. Returns `true` if a new row was inserted, `false` if
    /// the reviewer had already favorited it.
    pub async fn add(pool: &PgPool, talk_id: DbId, admin_user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO favorites (talk_id, admin_user_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_favorites_talk_admin DO NOTHING",
        )
        .bind(talk_id)
        .bind(admin_user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a favorite. Returns `true` if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        talk_id: DbId,
        admin_user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE talk_id = $1 AND admin_user_id = $2")
            .bind(talk_id)
            .bind(admin_user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Which of `talk_ids` the reviewer has favorited.
    pub async fn talk_ids_for_admin(
        pool: &PgPool,
        admin_user_id: DbId,
        talk_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT talk_id FROM favorites WHERE admin_user_id = $1 AND talk_id = ANY($2)",
        )
        .bind(admin_user_id)
        .bind(talk_ids)
        .fetch_all(pool)
        .await
    }
}
