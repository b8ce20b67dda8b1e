//! Reviewer-facing talk output.
//!
//! A [`FormattedTalk`] combines a talk row with the *requesting* reviewer's
//! own meta row and favorite flag. Meta rows belonging to other reviewers are
//! ignored; when the requesting reviewer has none, rating is `0` and viewed is
//! `false`.

use std::collections::{HashMap, HashSet};

use opencfp_core::rating::RATING_NEUTRAL;
use opencfp_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::models::talk::Talk;
use crate::models::talk_meta::TalkMeta;
use crate::models::user::SpeakerSummary;

/// The requesting reviewer's state for a talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TalkMetaView {
    pub rating: i16,
    pub viewed: bool,
}

impl Default for TalkMetaView {
    fn default() -> Self {
        Self {
            rating: RATING_NEUTRAL,
            viewed: false,
        }
    }
}

/// Presentation-ready talk.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedTalk {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
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
    /// Submitter details; omitted when the caller did not ask for them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SpeakerSummary>,
    pub meta: TalkMetaView,
    pub favorite: bool,
}

/// Related rows loaded alongside a batch of talks.
#[derive(Debug, Default)]
pub struct FormatContext {
    /// Meta rows keyed by `(talk_id, admin_user_id)`.
    metas: HashMap<(DbId, DbId), TalkMetaView>,
    /// Talks the requesting reviewer has favorited.
    favorites: HashSet<DbId>,
    /// Submitters keyed by user id. `None` means user data is not included.
    speakers: Option<HashMap<DbId, SpeakerSummary>>,
}

impl FormatContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metas(mut self, metas: impl IntoIterator<Item = TalkMeta>) -> Self {
        self.metas.extend(metas.into_iter().map(|m| {
            (
                (m.talk_id, m.admin_user_id),
                TalkMetaView {
                    rating: m.rating,
                    viewed: m.viewed,
                },
            )
        }));
        self
    }

    pub fn with_favorites(mut self, talk_ids: impl IntoIterator<Item = DbId>) -> Self {
        self.favorites.extend(talk_ids);
        self
    }

    pub fn with_speakers(mut self, speakers: impl IntoIterator<Item = SpeakerSummary>) -> Self {
        self.speakers = Some(speakers.into_iter().map(|s| (s.id, s)).collect());
        self
    }

    /// Format one talk for `admin_user_id`.
    pub fn format(&self, talk: &Talk, admin_user_id: DbId) -> FormattedTalk {
        let meta = self
            .metas
            .get(&(talk.id, admin_user_id))
            .copied()
            .unwrap_or_default();

        let user = self
            .speakers
            .as_ref()
            .and_then(|speakers| speakers.get(&talk.user_id).cloned());

        FormattedTalk {
            id: talk.id,
            user_id: talk.user_id,
            title: talk.title.clone(),
            description: talk.description.clone(),
            talk_type: talk.talk_type.clone(),
            level: talk.level.clone(),
            category: talk.category.clone(),
            slides: talk.slides.clone(),
            other: talk.other.clone(),
            sponsor: talk.sponsor,
            desired: talk.desired,
            selected: talk.selected,
            created_at: talk.created_at,
            user,
            meta,
            favorite: self.favorites.contains(&talk.id),
        }
    }

    /// Format a sequence of talks, preserving order and length.
    pub fn format_list(&self, talks: &[Talk], admin_user_id: DbId) -> Vec<FormattedTalk> {
        talks
            .iter()
            .map(|talk| self.format(talk, admin_user_id))
            .collect()
    }
}
