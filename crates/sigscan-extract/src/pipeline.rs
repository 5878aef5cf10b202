//! Feed-to-sink orchestration.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use sigscan_core::{AppConfig, FeedEntry, ScoredRecord, UpsertOutcome};

use crate::error::ExtractError;
use crate::extractor::SignalExtractor;
use crate::record::build_record;
use crate::sources::{fetch_feed_entries, FeedClient};

/// How many domains each upsert log line shows.
const LOGGED_DOMAINS: usize = 3;

/// Destination for assembled records.
pub trait RecordSink {
    type Error: Display;

    /// Insert or merge one record keyed by its `external_id`.
    ///
    /// A rejected row is an `Ok` outcome with a non-2xx status; `Err` is
    /// reserved for transport failures.
    fn upsert(
        &self,
        record: &ScoredRecord,
    ) -> impl Future<Output = Result<UpsertOutcome, Self::Error>> + Send;
}

/// Run knobs taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_entries_per_feed: usize,
    pub feed_timeout_secs: u64,
    pub user_agent: String,
    /// Pause after every sink call.
    pub inter_request_delay: Duration,
    pub persist_domains: bool,
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_entries_per_feed: config.max_entries_per_feed,
            feed_timeout_secs: config.feed_timeout_secs,
            user_agent: config.user_agent.clone(),
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
            persist_domains: config.persist_domains,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds_failed: usize,
    /// Entries examined across all feeds, after the per-feed cap.
    pub total_seen: usize,
    /// Entries that produced a record and were sent to the sink.
    pub kept: usize,
    /// Sink calls answered with a non-2xx status.
    pub rejected: usize,
    /// Sink calls that failed in transport.
    pub sink_failures: usize,
}

/// Turn entries into records without any I/O.
///
/// Applies the per-feed cap and drops entries with no recognisable name.
#[must_use]
pub fn process_entries(
    extractor: &SignalExtractor,
    entries: &[FeedEntry],
    options: &PipelineOptions,
) -> Vec<ScoredRecord> {
    let now = Utc::now();
    entries
        .iter()
        .take(options.max_entries_per_feed)
        .filter_map(|entry| extractor.assemble(entry, options.persist_domains, now))
        .collect()
}

/// Fetch every feed in order and upsert each named entry through `sink`.
///
/// Feed failures and sink failures are logged and counted; neither stops the
/// run.
///
/// # Errors
///
/// Returns [`ExtractError::Http`] only if the feed HTTP client cannot be
/// built.
pub async fn run_pipeline<S: RecordSink>(
    options: &PipelineOptions,
    extractor: &SignalExtractor,
    feeds: &[String],
    sink: &S,
) -> Result<RunSummary, ExtractError> {
    let client = FeedClient::new(options.feed_timeout_secs, &options.user_agent)?;
    let mut summary = RunSummary::default();

    for feed in feeds {
        let Some(entries) = fetch_feed_entries(&client, feed, options.max_entries_per_feed).await
        else {
            summary.feeds_failed += 1;
            continue;
        };

        upsert_entries(extractor, feed, &entries, sink, options, &mut summary).await;
    }

    tracing::info!(
        total_seen = summary.total_seen,
        kept = summary.kept,
        rejected = summary.rejected,
        sink_failures = summary.sink_failures,
        feeds_failed = summary.feeds_failed,
        "run complete"
    );
    Ok(summary)
}

/// Upsert every named entry of one feed, pausing after each sink call.
async fn upsert_entries<S: RecordSink>(
    extractor: &SignalExtractor,
    feed: &str,
    entries: &[FeedEntry],
    sink: &S,
    options: &PipelineOptions,
    summary: &mut RunSummary,
) {
    for entry in entries.iter().take(options.max_entries_per_feed) {
        summary.total_seen += 1;

        let Some(extraction) = extractor.extract(entry) else {
            tracing::debug!(feed = %feed, title = %entry.title, "no company name; skipping");
            continue;
        };
        let domains: Vec<String> = extraction
            .domains
            .iter()
            .take(LOGGED_DOMAINS)
            .cloned()
            .collect();
        let record = build_record(entry, extraction, options.persist_domains, Utc::now());

        summary.kept += 1;
        match sink.upsert(&record).await {
            Ok(outcome) if outcome.is_success() => {
                tracing::info!(
                    status = outcome.status,
                    name = %record.name,
                    score = record.rank_score,
                    domains = ?domains,
                    "upserted startup signal"
                );
            }
            Ok(outcome) => {
                summary.rejected += 1;
                tracing::warn!(
                    status = outcome.status,
                    name = %record.name,
                    score = record.rank_score,
                    domains = ?domains,
                    body = %outcome.body,
                    "sink rejected startup signal"
                );
            }
            Err(e) => {
                summary.sink_failures += 1;
                tracing::warn!(
                    name = %record.name,
                    external_id = %record.external_id,
                    error = %e,
                    "sink upsert failed"
                );
            }
        }

        if !options.inter_request_delay.is_zero() {
            tokio::time::sleep(options.inter_request_delay).await;
        }
    }
}
