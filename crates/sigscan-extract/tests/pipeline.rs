//! Integration tests for the feed pipeline using wiremock feeds and an
//! in-memory sink.

use std::sync::Mutex;
use std::time::Duration;

use sigscan_core::{Heuristics, ScoredRecord, UpsertOutcome};
use sigscan_extract::{
    external_id, run_pipeline, ExtractError, FeedClient, PipelineOptions, RecordSink,
    SignalExtractor,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Startup News</title>
    <link>https://news.example.com</link>
    <description>Funding rounds</description>
    <item>
      <title>Acme raises funds</title>
      <link>https://news.example.com/acme</link>
      <description>Visit acme.io for details</description>
    </item>
    <item>
      <title>UK Startups Raise Record Funding</title>
      <link>https://news.example.com/uk</link>
      <description>A roundup.</description>
    </item>
    <item>
      <title>OpenAI's new model</title>
      <link>https://news.example.com/openai</link>
      <description>Details inside.</description>
    </item>
  </channel>
</rss>"#;

/// Records every upsert and answers with a fixed status.
struct RecordingSink {
    status: u16,
    fail: bool,
    records: Mutex<Vec<ScoredRecord>>,
}

impl RecordingSink {
    fn new(status: u16) -> Self {
        Self {
            status,
            fail: false,
            records: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    fn names(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

impl RecordSink for RecordingSink {
    type Error = String;

    async fn upsert(&self, record: &ScoredRecord) -> Result<UpsertOutcome, Self::Error> {
        self.records.lock().unwrap().push(record.clone());
        if self.fail {
            return Err("connection reset".to_string());
        }
        Ok(UpsertOutcome {
            status: self.status,
            body: String::new(),
        })
    }
}

fn extractor() -> SignalExtractor {
    SignalExtractor::new(Heuristics::builtin().unwrap()).unwrap()
}

fn options(max: usize) -> PipelineOptions {
    PipelineOptions {
        max_entries_per_feed: max,
        feed_timeout_secs: 5,
        user_agent: "sigscan-test".to_string(),
        inter_request_delay: Duration::ZERO,
        persist_domains: false,
    }
}

async fn serve_feed(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn nameless_entries_never_reach_the_sink() {
    let server = MockServer::start().await;
    serve_feed(&server, "/feed", 200, FEED).await;

    let sink = RecordingSink::new(201);
    let feeds = vec![format!("{}/feed", server.uri())];
    let summary = run_pipeline(&options(15), &extractor(), &feeds, &sink)
        .await
        .expect("pipeline should run");

    assert_eq!(summary.total_seen, 3);
    assert_eq!(summary.kept, 2);
    assert_eq!(summary.sink_failures, 0);
    assert_eq!(summary.rejected, 0);
    assert_eq!(sink.names(), vec!["Acme", "OpenAI"]);
}

#[tokio::test]
async fn records_carry_score_and_stable_id() {
    let server = MockServer::start().await;
    serve_feed(&server, "/feed", 200, FEED).await;

    let sink = RecordingSink::new(201);
    let feeds = vec![format!("{}/feed", server.uri())];
    run_pipeline(&options(1), &extractor(), &feeds, &sink)
        .await
        .unwrap();

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    let acme = &records[0];
    // 50 + raises(18) + domain(10)
    assert_eq!(acme.rank_score, 78);
    assert_eq!(acme.external_id, external_id("https://news.example.com/acme"));
    assert_eq!(acme.description, "Visit acme.io for details");
}

#[tokio::test]
async fn failing_feed_is_skipped() {
    let server = MockServer::start().await;
    serve_feed(&server, "/broken", 500, "oops").await;
    serve_feed(&server, "/feed", 200, FEED).await;

    let sink = RecordingSink::new(201);
    let feeds = vec![
        format!("{}/broken", server.uri()),
        format!("{}/feed", server.uri()),
    ];
    let summary = run_pipeline(&options(15), &extractor(), &feeds, &sink)
        .await
        .unwrap();

    assert_eq!(summary.feeds_failed, 1);
    assert_eq!(summary.kept, 2);
}

#[tokio::test]
async fn sink_errors_and_rejections_are_counted_not_fatal() {
    let server = MockServer::start().await;
    serve_feed(&server, "/feed", 200, FEED).await;
    let feeds = vec![format!("{}/feed", server.uri())];

    let failing = RecordingSink::failing();
    let summary = run_pipeline(&options(15), &extractor(), &feeds, &failing)
        .await
        .unwrap();
    assert_eq!(summary.kept, 2);
    assert_eq!(summary.sink_failures, 2);

    let rejecting = RecordingSink::new(409);
    let summary = run_pipeline(&options(15), &extractor(), &feeds, &rejecting)
        .await
        .unwrap();
    assert_eq!(summary.kept, 2);
    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.sink_failures, 0);
}

#[tokio::test]
async fn feed_client_reports_unexpected_status() {
    let server = MockServer::start().await;
    serve_feed(&server, "/gone", 404, "").await;

    let client = FeedClient::new(5, "sigscan-test").unwrap();
    let url = format!("{}/gone", server.uri());
    let err = client.fetch(&url, 15).await.unwrap_err();
    assert!(
        matches!(err, ExtractError::UnexpectedStatus { status: 404, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn feed_client_caps_entries() {
    let server = MockServer::start().await;
    serve_feed(&server, "/feed", 200, FEED).await;

    let client = FeedClient::new(5, "sigscan-test").unwrap();
    let entries = client
        .fetch(&format!("{}/feed", server.uri()), 2)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Acme raises funds");
}
