//! Repository for the `talks` table.
//!
//! All reviewer listings go through [`TalkRepo::list`], which executes a
//! [`TalkQuery`] rendered by `opencfp_core::talk_query`.

use opencfp_core::talk_query::{BindValue, SortRequest, TalkListing, TalkQuery};
use opencfp_core::types::DbId;
use sqlx::PgPool;

use crate::formatter::{FormatContext, FormattedTalk};
use crate::models::talk::{CreateTalk, Talk};
use crate::repositories::{FavoriteRepo, TalkMetaRepo, UserRepo};

/// Unqualified column list for single-table queries.
const COLUMNS: &str = "id, user_id, title, description, type, level, category, slides, other, \
                       sponsor, desired, selected, created_at, updated_at";

/// Provides submission, selection and listing of talks.
pub struct TalkRepo;

impl TalkRepo {
    /// Insert a new talk owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTalk,
    ) -> Result<Talk, sqlx::Error> {
        let query = format!(
            "INSERT INTO talks (user_id, title, description, type, level, category,
                                slides, other, sponsor, desired)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Talk>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.talk_type)
            .bind(&input.level)
            .bind(&input.category)
            .bind(&input.slides)
            .bind(&input.other)
            .bind(input.sponsor)
            .bind(input.desired)
            .fetch_one(pool)
            .await
    }

    /// Find a talk by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Talk>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM talks WHERE id = $1");
        sqlx::query_as::<_, Talk>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the talks submitted by one user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Talk>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM talks WHERE user_id = $1 ORDER BY created_at DESC, id");
        sqlx::query_as::<_, Talk>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Set or clear a talk's selection flag.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_selected(
        pool: &PgPool,
        id: DbId,
        selected: bool,
    ) -> Result<Option<Talk>, sqlx::Error> {
        let query = format!("UPDATE talks SET selected = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Talk>(&query)
            .bind(id)
            .bind(selected)
            .fetch_optional(pool)
            .await
    }

    /// Execute a talk listing query.
    pub async fn list(pool: &PgPool, query: &TalkQuery) -> Result<Vec<Talk>, sqlx::Error> {
        let (sql, binds) = query.to_sql();
        tracing::debug!(%sql, binds = binds.len(), "Executing talk listing");

        let mut q = sqlx::query_as::<_, Talk>(&sql);
        for bind in binds {
            q = match bind {
                BindValue::Id(v) | BindValue::Int(v) => q.bind(v),
                BindValue::Text(v) => q.bind(v),
                BindValue::Ratings(v) => q.bind(v),
            };
        }
        q.fetch_all(pool).await
    }

    /// Run a listing for a reviewer and format every row with that
    /// reviewer's meta and favorite state.
    pub async fn list_formatted(
        pool: &PgPool,
        listing: &TalkListing,
        admin_user_id: DbId,
        sort: &SortRequest,
        include_user: bool,
    ) -> Result<Vec<FormattedTalk>, sqlx::Error> {
        let talks = Self::list(pool, &listing.query(admin_user_id, sort)).await?;
        let context = Self::load_context(pool, &talks, admin_user_id, include_user).await?;
        Ok(context.format_list(&talks, admin_user_id))
    }

    /// Format a single talk for a reviewer, including submitter details.
    pub async fn format_one(
        pool: &PgPool,
        talk: &Talk,
        admin_user_id: DbId,
    ) -> Result<FormattedTalk, sqlx::Error> {
        let context =
            Self::load_context(pool, std::slice::from_ref(talk), admin_user_id, true).await?;
        Ok(context.format(talk, admin_user_id))
    }

    /// Load the meta rows, favorites and (optionally) submitters for `talks`.
    async fn load_context(
        pool: &PgPool,
        talks: &[Talk],
        admin_user_id: DbId,
        include_user: bool,
    ) -> Result<FormatContext, sqlx::Error> {
        if talks.is_empty() {
            return Ok(FormatContext::new());
        }

        let talk_ids: Vec<DbId> = talks.iter().map(|t| t.id).collect();
        let metas = TalkMetaRepo::list_for_admin(pool, admin_user_id, &talk_ids).await?;
        let favorites = FavoriteRepo::talk_ids_for_admin(pool, admin_user_id, &talk_ids).await?;

        let mut context = FormatContext::new()
            .with_metas(metas)
            .with_favorites(favorites);

        if include_user {
            let mut user_ids: Vec<DbId> = talks.iter().map(|t| t.user_id).collect();
            user_ids.sort_unstable();
            user_ids.dedup();
            context = context.with_speakers(UserRepo::speakers_by_ids(pool, &user_ids).await?);
        }

        Ok(context)
    }
}
