//! Reviewer speaker directory search.
//!
//! Like the talk listings, ordering options that are missing or not
//! whitelisted fall back to the defaults (`first_name ASC`) instead of
//! failing.

use crate::talk_query::SortDirection;

/// Columns a caller may order the speaker directory by.
pub const SPEAKER_ORDER_WHITELIST: &[&str] = &["first_name", "last_name", "company", "created_at"];

/// Column the speaker directory is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerOrderBy {
    FirstName,
    LastName,
    Company,
    CreatedAt,
}

impl SpeakerOrderBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first_name" => Some(Self::FirstName),
            "last_name" => Some(Self::LastName),
            "company" => Some(Self::Company),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Company => "company",
            Self::CreatedAt => "created_at",
        }
    }
}

/// A resolved speaker directory query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerSearch {
    /// Trimmed search term; `None` lists everyone.
    pub term: Option<String>,
    pub order_by: SpeakerOrderBy,
    pub order: SortDirection,
}

impl SpeakerSearch {
    /// Build a search from raw query parameters. Never fails.
    pub fn resolve(search: Option<&str>, order_by: Option<&str>, order: Option<&str>) -> Self {
        Self {
            term: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            order_by: order_by
                .and_then(SpeakerOrderBy::parse)
                .unwrap_or(SpeakerOrderBy::FirstName),
            order: order
                .and_then(SortDirection::parse)
                .unwrap_or(SortDirection::Asc),
        }
    }

    /// `ILIKE` pattern matching the term anywhere, with wildcards in the
    /// term escaped.
    pub fn like_pattern(&self) -> Option<String> {
        self.term.as_ref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }

    /// `ORDER BY` clause body, with a deterministic id tiebreak.
    pub fn order_clause(&self) -> String {
        format!("{} {}, id ASC", self.order_by.column(), self.order.as_sql())
    }
}
