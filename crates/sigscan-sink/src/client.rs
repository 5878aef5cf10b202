//! HTTP client for the Supabase `PostgREST` endpoint.
//!
//! Each record is POSTed as a single JSON object with a merge-duplicates
//! preference, so re-running over the same feed entries updates rows in place
//! instead of failing on the `external_id` conflict.

use std::time::Duration;

use reqwest::{Client, Url};
use sigscan_core::{ScoredRecord, UpsertOutcome};
use sigscan_extract::RecordSink;

use crate::error::SinkError;

const CONFLICT_COLUMN: &str = "external_id";
const PREFER: &str = "resolution=merge-duplicates,return=minimal";
const USER_AGENT: &str = "sigscan/0.1 (startup-signals)";

/// Upsert sink for one `PostgREST` table.
pub struct SupabaseSink {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl std::fmt::Debug for SupabaseSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseSink")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl SupabaseSink {
    /// Creates a sink for `{base_url}/rest/v1/{table}`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`SinkError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        table: &str,
        timeout_secs: u64,
    ) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let endpoint = endpoint_url(base_url, table)?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Full request URL, including the `on_conflict` query.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST one record.
    ///
    /// Any HTTP status is returned as an [`UpsertOutcome`]; no retries. A body
    /// that cannot be read is logged and left empty.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Http`] on network failure or timeout.
    pub async fn upsert_record(&self, record: &ScoredRecord) -> Result<UpsertOutcome, SinkError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", PREFER)
            .json(record)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    status,
                    external_id = %record.external_id,
                    error = %e,
                    "failed to read upsert response body"
                );
                String::new()
            }
        };
        tracing::debug!(status, external_id = %record.external_id, "upsert response");

        Ok(UpsertOutcome { status, body })
    }
}

impl RecordSink for SupabaseSink {
    type Error = SinkError;

    async fn upsert(&self, record: &ScoredRecord) -> Result<UpsertOutcome, Self::Error> {
        self.upsert_record(record).await
    }
}

/// `{base}/rest/v1/{table}?on_conflict=external_id`, tolerating trailing
/// slashes on `base`.
fn endpoint_url(base_url: &str, table: &str) -> Result<Url, SinkError> {
    let invalid = |reason: String| SinkError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".to_string()));
    }

    let mut endpoint = base
        .join(&format!("rest/v1/{table}"))
        .map_err(|e| invalid(e.to_string()))?;
    endpoint
        .query_pairs_mut()
        .append_pair("on_conflict", CONFLICT_COLUMN);
    Ok(endpoint)
}
