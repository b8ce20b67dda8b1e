//! Repository for the `users` table.

use opencfp_core::speaker_search::SpeakerSearch;
use opencfp_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, SpeakerSummary, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, first_name, last_name, company, twitter, url, \
                       speaker_info, speaker_bio, role_id, is_active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, company, twitter,
                                url, speaker_info, speaker_bio, role_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.company)
            .bind(&input.twitter)
            .bind(&input.url)
            .bind(&input.speaker_info)
            .bind(&input.speaker_bio)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a user's profile fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                company = $5,
                twitter = $6,
                url = $7,
                speaker_info = $8,
                speaker_bio = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.company)
            .bind(&input.twitter)
            .bind(&input.url)
            .bind(&input.speaker_info)
            .bind(&input.speaker_bio)
            .fetch_optional(pool)
            .await
    }

    /// Load submitter summaries for a batch of user ids.
    pub async fn speakers_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<SpeakerSummary>, sqlx::Error> {
        sqlx::query_as::<_, SpeakerSummary>(
            "SELECT id, first_name, last_name, company, twitter FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Search the speaker directory by first name, last name or company.
    pub async fn search(
        pool: &PgPool,
        search: &SpeakerSearch,
    ) -> Result<Vec<SpeakerSummary>, sqlx::Error> {
        let mut query = "SELECT id, first_name, last_name, company, twitter FROM users".to_string();
        let pattern = search.like_pattern();
        if pattern.is_some() {
            query.push_str(" WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR company ILIKE $1");
        }
        query.push_str(&format!(" ORDER BY {}", search.order_clause()));

        let mut q = sqlx::query_as::<_, SpeakerSummary>(&query);
        if let Some(pattern) = pattern {
            q = q.bind(pattern);
        }
        q.fetch_all(pool).await
    }
}
