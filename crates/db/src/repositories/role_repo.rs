//! Repository for the `roles` lookup table.

use opencfp_core::types::DbId;
use sqlx::PgPool;

/// Read-only access to the seeded roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Resolve a role id to its name.
    ///
    /// Returns `RowNotFound` if the id does not exist.
    pub async fn resolve_name(pool: &PgPool, id: DbId) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
