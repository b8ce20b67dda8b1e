//! Query parameter types for API handlers.

use opencfp_core::speaker_search::SpeakerSearch;
use opencfp_core::talk_query::SortRequest;
use serde::Deserialize;

/// Query parameters for `GET /reviewer/talks`.
///
/// `filter` selects one of the fixed listings (`selected`, `recent`,
/// `favorites`, `top`, `notviewed`, `viewed`, `rated`, `plusone`,
/// `notrated`); anything else lists all talks. When `column` is present the
/// column-filtered listing is used instead and `filter` is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TalkListParams {
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub column: Option<String>,
    pub value: Option<String>,
}

impl TalkListParams {
    pub fn sort_request(&self) -> SortRequest {
        SortRequest {
            order_by: self.order_by.clone(),
            sort: self.sort.clone(),
        }
    }
}

/// Query parameters for `GET /reviewer/speakers`.
#[derive(Debug, Default, Deserialize)]
pub struct SpeakerListParams {
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub order: Option<String>,
}

impl SpeakerListParams {
    pub fn speaker_search(&self) -> SpeakerSearch {
        SpeakerSearch::resolve(
            self.search.as_deref(),
            self.order_by.as_deref(),
            self.order.as_deref(),
        )
    }
}
