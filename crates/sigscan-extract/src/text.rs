//! Whitespace, markup, and entity cleanup for feed text.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tags regex"));

/// Collapse every whitespace run to a single space and trim both ends.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip markup tags, decode HTML entities, then [`normalize`].
///
/// Tags are replaced by a space so adjacent block elements do not glue
/// words together. Tags are removed before decoding so an escaped `&lt;`
/// in prose survives as a literal `<`.
#[must_use]
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let no_tags = TAG_RE.replace_all(text, " ");
    let decoded = html_escape::decode_html_entities(&no_tags);
    normalize(&decoded)
}

/// Keep at most `max` characters, cutting on a `char` boundary.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
