//! `run` command: drain feeds into the sink, or print records on a dry run.

use std::time::Duration;

use sigscan_core::{
    load_app_config, load_dry_run_config, load_heuristics, AppConfig, ScoredRecord, UpsertOutcome,
};
use sigscan_extract::{run_pipeline, PipelineOptions, RecordSink, RunSummary, SignalExtractor};
use sigscan_sink::SupabaseSink;

use crate::init_tracing;

/// Run the scanner end to end.
///
/// A dry run needs no sink credentials and never touches the datastore.
///
/// # Errors
///
/// Returns an error if configuration or heuristics fail to load, or an HTTP
/// client cannot be built. Feed and sink failures are logged and skipped.
pub(crate) async fn run_scan(dry_run: bool, feed_overrides: Vec<String>) -> anyhow::Result<()> {
    let config = if dry_run {
        load_dry_run_config()?
    } else {
        load_app_config()?
    };
    init_tracing(&config.log_level)?;

    let heuristics = load_heuristics(config.heuristics_path.as_deref())?;
    let extractor = SignalExtractor::new(heuristics)?;
    let mut options = PipelineOptions::from_app_config(&config);
    let feeds = select_feeds(&config, feed_overrides);

    let summary = if dry_run {
        options.inter_request_delay = Duration::ZERO;
        run_pipeline(&options, &extractor, &feeds, &StdoutSink).await?
    } else {
        let sink = SupabaseSink::new(
            &config.supabase_url,
            &config.supabase_key,
            &config.table,
            config.sink_timeout_secs,
        )?;
        run_pipeline(&options, &extractor, &feeds, &sink).await?
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "DONE. total_seen={} kept={} rejected={} sink_failures={} feeds_failed={}",
        summary.total_seen,
        summary.kept,
        summary.rejected,
        summary.sink_failures,
        summary.feeds_failed
    );
}

/// `--feed` flags replace the configured list entirely.
fn select_feeds(config: &AppConfig, overrides: Vec<String>) -> Vec<String> {
    if overrides.is_empty() {
        config.feeds.clone()
    } else {
        overrides
    }
}

/// Dry-run sink: one JSON line per record on stdout.
struct StdoutSink;

impl RecordSink for StdoutSink {
    type Error = serde_json::Error;

    async fn upsert(&self, record: &ScoredRecord) -> Result<UpsertOutcome, Self::Error> {
        println!("{}", serde_json::to_string(record)?);
        Ok(UpsertOutcome {
            status: 200,
            body: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sigscan_core::{FeedEntry, Heuristics};

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            supabase_url: String::new(),
            supabase_key: String::new(),
            table: "startups".to_string(),
            feeds: vec!["https://configured.example/feed".to_string()],
            log_level: "info".to_string(),
            heuristics_path: None,
            max_entries_per_feed: 15,
            sink_timeout_secs: 20,
            feed_timeout_secs: 30,
            inter_request_delay_ms: 200,
            user_agent: "sigscan-test".to_string(),
            persist_domains: false,
        }
    }

    #[test]
    fn configured_feeds_are_used_without_overrides() {
        assert_eq!(
            select_feeds(&config(), Vec::new()),
            vec!["https://configured.example/feed"]
        );
    }

    #[test]
    fn overrides_replace_configured_feeds() {
        let overrides = vec!["https://a.example/rss".to_string()];
        assert_eq!(select_feeds(&config(), overrides.clone()), overrides);
    }

    #[tokio::test]
    async fn stdout_sink_accepts_every_record() {
        let extractor = SignalExtractor::new(Heuristics::builtin().unwrap()).unwrap();
        let entry = FeedEntry::new("Acme Corp raises $10M", "https://x.com/a", "");
        let record = extractor.assemble(&entry, false, Utc::now()).unwrap();

        let outcome = StdoutSink.upsert(&record).await.unwrap();
        assert!(outcome.is_success());
        assert!(outcome.body.is_empty());
    }
}
