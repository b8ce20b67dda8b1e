//! Markup stripping for free-text form fields.

use std::sync::LazyLock;

use regex::Regex;

/// Matches an opening, closing, or self-closing HTML tag, including comments.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!][^>]*>").expect("valid regex"));

/// Remove HTML tags and NUL bytes from user-submitted text.
///
/// Text without markup is returned unchanged, so callers can compare the
/// result against the raw input to detect injected tags.
pub fn sanitize(raw: &str) -> String {
    TAG_RE.replace_all(raw, "").replace('\0', "")
}
