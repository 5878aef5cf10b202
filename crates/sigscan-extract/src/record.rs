//! Assembly of [`ScoredRecord`]s from feed entries.

use chrono::{DateTime, Timelike, Utc};
use sigscan_core::signals::SOURCE_TYPE;
use sigscan_core::{FeedEntry, ScoredRecord};

use crate::text::{clean, truncate_chars};

/// Cap for the cleaned `raw_title` and `description`.
pub const MAX_TEXT_CHARS: usize = 400;
/// Cap for the optional comma-joined `domains` column.
pub const MAX_DOMAINS_CHARS: usize = 4000;

const DEFAULT_RISK: &str = "MED";
const DEFAULT_VERIFICATION: &str = "UNVERIFIED";

/// Stable upsert key for a source link: lowercase hex MD5 of the raw bytes.
#[must_use]
pub fn external_id(link: &str) -> String {
    format!("{:x}", md5::compute(link.as_bytes()))
}

/// Everything the extractors produced for one entry.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub name: String,
    pub domains: Vec<String>,
    pub rank_score: u8,
}

/// Build the row for `entry`. `now` is truncated to whole seconds.
#[must_use]
pub fn build_record(
    entry: &FeedEntry,
    extraction: Extraction,
    persist_domains: bool,
    now: DateTime<Utc>,
) -> ScoredRecord {
    let domains =
        persist_domains.then(|| truncate_chars(&extraction.domains.join(","), MAX_DOMAINS_CHARS));

    ScoredRecord {
        external_id: external_id(&entry.link),
        name: extraction.name,
        raw_title: truncate_chars(&clean(&entry.title), MAX_TEXT_CHARS),
        description: truncate_chars(&clean(&entry.summary), MAX_TEXT_CHARS),
        source_url: entry.link.clone(),
        source_type: SOURCE_TYPE.to_string(),
        rank_score: extraction.rank_score,
        tm_risk: DEFAULT_RISK.to_string(),
        dom_risk: DEFAULT_RISK.to_string(),
        verification_status: DEFAULT_VERIFICATION.to_string(),
        confidence: 0,
        created_at: now.with_nanosecond(0).unwrap_or(now),
        domains,
    }
}
