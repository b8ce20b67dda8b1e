//! Declarative talk listing queries.
//!
//! Every reviewer-facing talk listing is described by a [`TalkListing`]
//! variant. A listing resolves the caller's sort request against its own
//! defaults and lowers to a [`TalkQuery`]: a join, a set of predicates, an
//! optional aggregate and an ordering. [`TalkQuery::to_sql`] renders that into
//! a single parameterized statement, so the repository layer has exactly one
//! executor for all listings.
//!
//! Two input policies coexist:
//! - an unknown `order_by` / `sort` value silently falls back to the
//!   listing's default ([`SortOptions::resolve`]);
//! - an unknown filter column is rejected with [`CoreError::Validation`]
//!   ([`FilterColumn::parse`]) before any query is built.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rating::{RATING_MINUS_ONE, RATING_PLUS_ONE};
use crate::types::DbId;

/// Number of talks returned by the "recent" listing when no limit is given.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Upper bound on the "recent" listing limit.
pub const MAX_RECENT_LIMIT: i64 = 100;

/// `order_by` values a caller may request.
pub const ORDER_BY_WHITELIST: &[&str] = &["created_at", "title", "type", "category"];

/// Columns the filtered listing may match on.
pub const FILTER_COLUMN_WHITELIST: &[&str] = &["category", "type", "level"];

/// Columns selected for every talk listing.
pub const TALK_COLUMNS: &str = "t.id, t.user_id, t.title, t.description, t.type, t.level, \
                                t.category, t.slides, t.other, t.sponsor, t.desired, \
                                t.selected, t.created_at, t.updated_at";

// ---------------------------------------------------------------------------
// Sort options
// ---------------------------------------------------------------------------

/// Sort direction. Only the exact strings `ASC` and `DESC` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Column a listing is ordered by.
///
/// Only the first four variants can be requested by callers; the rest are
/// listing-specific defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    CreatedAt,
    Title,
    Type,
    Category,
    /// When the requesting reviewer favorited the talk.
    FavoritedAt,
    /// When the requesting reviewer's meta row was created.
    RatedAt,
    /// Sum of every reviewer's rating.
    TotalRating,
}

impl OrderBy {
    /// Parse a caller-supplied `order_by`. Returns `None` unless the value is
    /// in [`ORDER_BY_WHITELIST`].
    pub fn parse_whitelisted(value: &str) -> Option<Self> {
        match value {
            "created_at" => Some(Self::CreatedAt),
            "title" => Some(Self::Title),
            "type" => Some(Self::Type),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    /// Qualified SQL expression for this ordering.
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "t.created_at",
            Self::Title => "t.title",
            Self::Type => "t.type",
            Self::Category => "t.category",
            Self::FavoritedAt => "f.created_at",
            Self::RatedAt => "m.created_at",
            Self::TotalRating => "total_rating",
        }
    }
}

/// Raw sort request as received from a caller. Either field may be missing
/// or hold an arbitrary string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortRequest {
    pub order_by: Option<String>,
    pub sort: Option<String>,
}

/// Resolved, always-valid ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOptions {
    pub order_by: OrderBy,
    pub sort: SortDirection,
}

impl SortOptions {
    pub const fn new(order_by: OrderBy, sort: SortDirection) -> Self {
        Self { order_by, sort }
    }

    /// Fill in and validate a caller's sort request.
    ///
    /// Each field is checked independently: a missing or unrecognized value
    /// is replaced by the corresponding field of `defaults`. Never fails.
    pub fn resolve(requested: &SortRequest, defaults: SortOptions) -> SortOptions {
        let order_by = requested
            .order_by
            .as_deref()
            .and_then(OrderBy::parse_whitelisted)
            .unwrap_or(defaults.order_by);

        let sort = requested
            .sort
            .as_deref()
            .and_then(SortDirection::parse)
            .unwrap_or(defaults.sort);

        SortOptions { order_by, sort }
    }
}

// ---------------------------------------------------------------------------
// Filter column
// ---------------------------------------------------------------------------

/// Talk column the filtered listing may match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Category,
    Type,
    Level,
}

impl FilterColumn {
    /// Parse a filter column name, rejecting anything outside
    /// [`FILTER_COLUMN_WHITELIST`].
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "category" => Ok(Self::Category),
            "type" => Ok(Self::Type),
            "level" => Ok(Self::Level),
            other => Err(CoreError::Validation(format!(
                "Invalid filter column '{other}'. Must be one of: {}",
                FILTER_COLUMN_WHITELIST.join(", ")
            ))),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Category => "t.category",
            Self::Type => "t.type",
            Self::Level => "t.level",
        }
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// The fixed set of reviewer talk listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalkListing {
    /// Every talk.
    All,
    /// Talks an admin has selected for the schedule.
    Selected,
    /// The newest talks, always newest first.
    Recent { limit: i64 },
    /// Talks the requesting reviewer has favorited.
    Favorites,
    /// Talks whose summed rating across all reviewers is positive.
    TopRated,
    /// Talks the requesting reviewer has not opened (or has no meta row for).
    NotViewed,
    /// Talks the requesting reviewer has opened.
    Viewed,
    /// Talks the requesting reviewer rated +1 or -1.
    Rated,
    /// Talks the requesting reviewer rated +1.
    PlusOne,
    /// Talks the requesting reviewer rated 0 or never rated.
    NotRated,
    /// Talks whose `column` equals `value` exactly.
    FilteredBy { column: FilterColumn, value: String },
}

impl TalkListing {
    /// Parse the `filter` query parameter used by the reviewer talk list.
    ///
    /// Unknown or missing filters select [`TalkListing::All`]. The filtered
    /// listing is built separately via [`TalkListing::filtered_by`].
    pub fn from_filter(filter: Option<&str>, limit: Option<i64>) -> Self {
        match filter {
            Some("selected") => Self::Selected,
            Some("recent") => Self::Recent {
                limit: limit
                    .unwrap_or(DEFAULT_RECENT_LIMIT)
                    .clamp(1, MAX_RECENT_LIMIT),
            },
            Some("favorites") => Self::Favorites,
            Some("top") => Self::TopRated,
            Some("notviewed") => Self::NotViewed,
            Some("viewed") => Self::Viewed,
            Some("rated") => Self::Rated,
            Some("plusone") => Self::PlusOne,
            Some("notrated") => Self::NotRated,
            _ => Self::All,
        }
    }

    /// Build the column-filtered listing, rejecting non-whitelisted columns.
    pub fn filtered_by(column: &str, value: impl Into<String>) -> Result<Self, CoreError> {
        Ok(Self::FilteredBy {
            column: FilterColumn::parse(column)?,
            value: value.into(),
        })
    }

    /// The ordering used when the caller supplies none (or an invalid one).
    pub fn default_sort(&self) -> SortOptions {
        use OrderBy::*;
        use SortDirection::*;

        match self {
            Self::All => SortOptions::new(CreatedAt, Asc),
            Self::Selected | Self::Recent { .. } => SortOptions::new(CreatedAt, Desc),
            Self::Favorites => SortOptions::new(FavoritedAt, Desc),
            Self::TopRated => SortOptions::new(TotalRating, Desc),
            Self::NotViewed | Self::Viewed | Self::NotRated => SortOptions::new(CreatedAt, Desc),
            Self::Rated | Self::PlusOne => SortOptions::new(RatedAt, Desc),
            Self::FilteredBy { .. } => SortOptions::new(CreatedAt, Desc),
        }
    }

    /// Lower this listing into a query for the given reviewer.
    pub fn query(&self, admin_user_id: DbId, requested: &SortRequest) -> TalkQuery {
        let defaults = self.default_sort();
        let order = match self {
            // The recent listing ignores caller ordering.
            Self::Recent { .. } => defaults,
            _ => SortOptions::resolve(requested, defaults),
        };

        let mut query = TalkQuery {
            admin_user_id,
            join: None,
            predicates: Vec::new(),
            aggregate: None,
            order,
            limit: None,
        };

        match self {
            Self::All => {}
            Self::Selected => query.predicates.push(Predicate::Selected),
            Self::Recent { limit } => query.limit = Some(*limit),
            Self::Favorites => query.join = Some(Join::FavoritesOfAdmin),
            Self::TopRated => {
                query.join = Some(Join::AllMeta);
                query.aggregate = Some(Aggregate::PositiveTotalRating);
            }
            Self::NotViewed => {
                query.join = Some(Join::MetaOfAdmin { outer: true });
                query.predicates.push(Predicate::NotViewed);
            }
            Self::Viewed => {
                query.join = Some(Join::MetaOfAdmin { outer: false });
                query.predicates.push(Predicate::Viewed);
            }
            Self::Rated => {
                query.join = Some(Join::MetaOfAdmin { outer: false });
                query
                    .predicates
                    .push(Predicate::RatingIn(&[RATING_PLUS_ONE, RATING_MINUS_ONE]));
            }
            Self::PlusOne => {
                query.join = Some(Join::MetaOfAdmin { outer: false });
                query.predicates.push(Predicate::RatingIn(&[RATING_PLUS_ONE]));
            }
            Self::NotRated => {
                query.join = Some(Join::MetaOfAdmin { outer: true });
                query.predicates.push(Predicate::NotRated);
            }
            Self::FilteredBy { column, value } => {
                query
                    .predicates
                    .push(Predicate::ColumnEquals(*column, value.clone()));
            }
        }

        query
    }
}

// ---------------------------------------------------------------------------
// Query description
// ---------------------------------------------------------------------------

/// Table joined onto `talks t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// `favorites f` rows belonging to the requesting reviewer.
    FavoritesOfAdmin,
    /// Every reviewer's `talk_meta m` row.
    AllMeta,
    /// The requesting reviewer's `talk_meta m` row. With `outer`, talks
    /// without such a row are kept with NULL meta columns.
    MetaOfAdmin { outer: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Selected,
    Viewed,
    NotViewed,
    RatingIn(&'static [i16]),
    NotRated,
    ColumnEquals(FilterColumn, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// Group per talk, keep talks whose summed rating is above zero.
    PositiveTotalRating,
}

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Id(DbId),
    Int(i64),
    Text(String),
    Ratings(Vec<i16>),
}

/// A fully specified talk listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkQuery {
    pub admin_user_id: DbId,
    pub join: Option<Join>,
    pub predicates: Vec<Predicate>,
    pub aggregate: Option<Aggregate>,
    pub order: SortOptions,
    pub limit: Option<i64>,
}

impl TalkQuery {
    /// Render this query as a PostgreSQL statement plus its bind values, in
    /// placeholder order.
    pub fn to_sql(&self) -> (String, Vec<BindValue>) {
        let mut binds: Vec<BindValue> = Vec::new();

        let mut sql = format!("SELECT {TALK_COLUMNS}");
        if self.aggregate == Some(Aggregate::PositiveTotalRating) {
            sql.push_str(", SUM(m.rating) AS total_rating, COUNT(m.rating) AS review_count");
        }
        sql.push_str(" FROM talks t");

        match self.join {
            None => {}
            Some(Join::FavoritesOfAdmin) => {
                let p = push_bind(BindValue::Id(self.admin_user_id), &mut binds);
                sql.push_str(&format!(
                    " INNER JOIN favorites f ON f.talk_id = t.id AND f.admin_user_id = {p}"
                ));
            }
            Some(Join::AllMeta) => sql.push_str(" INNER JOIN talk_meta m ON m.talk_id = t.id"),
            Some(Join::MetaOfAdmin { outer }) => {
                let p = push_bind(BindValue::Id(self.admin_user_id), &mut binds);
                let kind = if outer { "LEFT" } else { "INNER" };
                sql.push_str(&format!(
                    " {kind} JOIN talk_meta m ON m.talk_id = t.id AND m.admin_user_id = {p}"
                ));
            }
        }

        let mut clauses: Vec<String> = Vec::with_capacity(self.predicates.len());
        for predicate in &self.predicates {
            let clause = match predicate {
                Predicate::Selected => "t.selected = TRUE".to_string(),
                Predicate::Viewed => "m.viewed = TRUE".to_string(),
                Predicate::NotViewed => "(m.viewed IS NULL OR m.viewed = FALSE)".to_string(),
                Predicate::RatingIn(ratings) => {
                    let p = push_bind(BindValue::Ratings(ratings.to_vec()), &mut binds);
                    format!("m.rating = ANY({p})")
                }
                Predicate::NotRated => "(m.rating IS NULL OR m.rating = 0)".to_string(),
                Predicate::ColumnEquals(column, value) => {
                    let p = push_bind(BindValue::Text(value.clone()), &mut binds);
                    format!("{} = {p}", column.column())
                }
            };
            clauses.push(clause);
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if self.aggregate == Some(Aggregate::PositiveTotalRating) {
            sql.push_str(" GROUP BY t.id HAVING SUM(m.rating) > 0");
        }

        sql.push_str(&format!(
            " ORDER BY {} {}, t.id ASC",
            self.order.order_by.column(),
            self.order.sort.as_sql()
        ));

        if let Some(limit) = self.limit {
            let p = push_bind(BindValue::Int(limit), &mut binds);
            sql.push_str(&format!(" LIMIT {p}"));
        }

        (sql, binds)
    }
}

/// Append a bind value and return its `$n` placeholder.
fn push_bind(value: BindValue, binds: &mut Vec<BindValue>) -> String {
    binds.push(value);
    format!("${}", binds.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
