//! Keyword-weighted relevance scorer for startup headlines.

use std::collections::BTreeSet;

use sigscan_core::Heuristics;

/// Starting point before any keyword or domain adjustments.
pub const BASE_SCORE: i32 = 50;

/// Score a feed entry in `[0, 100]`.
///
/// Every keyword from the positive and negative tables that occurs as a
/// case-insensitive substring of `"{title} {summary}"` contributes its weight
/// once. Finding at least one domain adds `domain_bonus`; a domain ending in
/// `risky_suffix` adds `risky_suffix_bonus` on top. The sum is clamped.
#[must_use]
pub fn relevance_score(
    title: &str,
    summary: &str,
    domains: &BTreeSet<String>,
    h: &Heuristics,
) -> u8 {
    let text = format!("{title} {summary}").to_lowercase();

    let mut score = BASE_SCORE;
    for (keyword, weight) in h.positive_keywords.iter().chain(&h.negative_keywords) {
        if text.contains(keyword.as_str()) {
            score = score.saturating_add(*weight);
        }
    }

    if !domains.is_empty() {
        score = score.saturating_add(h.domain_bonus);
        // Higher score for .info hosts is observed behaviour, not a risk signal.
        if domains.iter().any(|d| d.ends_with(&h.risky_suffix)) {
            score = score.saturating_add(h.risky_suffix_bonus);
        }
    }

    u8::try_from(score.clamp(0, 100)).unwrap_or(0)
}
