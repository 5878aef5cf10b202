use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Constant `source_type` tag for rows produced by the feed scanner.
pub const SOURCE_TYPE: &str = "WebScan";

/// One item from a syndicated feed. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Free text; may still contain HTML markup and entities.
    pub summary: String,
}

impl FeedEntry {
    #[must_use]
    pub fn new(title: &str, link: &str, summary: &str) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            summary: summary.to_string(),
        }
    }
}

/// A startup signal ready for upsert into the `startups` table.
///
/// Field names match the table columns. The risk and verification fields are
/// placeholders filled in later by manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// Hex MD5 of the raw source link; the upsert conflict key.
    pub external_id: String,
    pub name: String,
    pub raw_title: String,
    pub description: String,
    pub source_url: String,
    pub source_type: String,
    /// Heuristic relevance in `[0, 100]`.
    pub rank_score: u8,
    pub tm_risk: String,
    pub dom_risk: String,
    pub verification_status: String,
    pub confidence: u8,
    /// Ingestion time, truncated to whole seconds.
    pub created_at: DateTime<Utc>,
    /// Comma-joined domain list. Only sent when the run persists domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,
}

/// What the datastore answered for one upsert.
///
/// A non-2xx status is still an outcome, not an error; callers log it and
/// move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub status: u16,
    pub body: String,
}

impl UpsertOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
