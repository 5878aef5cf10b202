//! Integration tests for `SupabaseSink` using wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use sigscan_core::ScoredRecord;
use sigscan_extract::RecordSink;
use sigscan_sink::{SinkError, SupabaseSink};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_sink(base_url: &str) -> SupabaseSink {
    SupabaseSink::new(base_url, "service-key", "startups", 5)
        .expect("sink construction should not fail")
}

fn record() -> ScoredRecord {
    ScoredRecord {
        external_id: "900150983cd24fb0d6963f7d28e17f72".to_string(),
        name: "Acme".to_string(),
        raw_title: "Acme raises funds".to_string(),
        description: "Visit acme.io for details".to_string(),
        source_url: "https://news.example.com/acme".to_string(),
        source_type: "WebScan".to_string(),
        rank_score: 78,
        tm_risk: "MED".to_string(),
        dom_risk: "MED".to_string(),
        verification_status: "UNVERIFIED".to_string(),
        confidence: 0,
        created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        domains: None,
    }
}

#[tokio::test]
async fn upsert_posts_row_with_postgrest_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/startups"))
        .and(query_param("on_conflict", "external_id"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .and(header("content-type", "application/json"))
        .and(|req: &Request| {
            req.headers.get("prefer").and_then(|v| v.to_str().ok())
                == Some("resolution=merge-duplicates,return=minimal")
        })
        .and(body_partial_json(serde_json::json!({
            "external_id": "900150983cd24fb0d6963f7d28e17f72",
            "name": "Acme",
            "rank_score": 78,
            "source_type": "WebScan",
            "created_at": "2025-03-14T09:26:53Z"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = test_sink(&server.uri())
        .upsert_record(&record())
        .await
        .expect("upsert should succeed");

    assert_eq!(outcome.status, 201);
    assert!(outcome.is_success());
    assert!(outcome.body.is_empty());
}

#[tokio::test]
async fn rejected_row_is_an_outcome_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/startups"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"message":"column \"domains\" does not exist"}"#),
        )
        .mount(&server)
        .await;

    let outcome = test_sink(&server.uri())
        .upsert(&record())
        .await
        .expect("non-2xx is not a transport error");

    assert_eq!(outcome.status, 400);
    assert!(!outcome.is_success());
    assert!(outcome.body.contains("domains"));
}

#[tokio::test]
async fn domains_column_is_sent_when_present() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/startups"))
        .and(body_partial_json(serde_json::json!({
            "domains": "acme.io,news.example.com"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut row = record();
    row.domains = Some("acme.io,news.example.com".to_string());
    let outcome = test_sink(&server.uri()).upsert(&row).await.unwrap();
    assert_eq!(outcome.status, 201);
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    // Port 1 is reserved and refuses connections.
    let err = test_sink("http://127.0.0.1:1")
        .upsert(&record())
        .await
        .unwrap_err();
    assert!(matches!(err, SinkError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn repeated_upserts_use_the_same_conflict_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/startups"))
        .and(query_param("on_conflict", "external_id"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let sink = test_sink(&format!("{}/", server.uri()));
    let first = sink.upsert(&record()).await.unwrap();
    let second = sink.upsert(&record()).await.unwrap();
    assert_eq!(first.status, 201);
    assert_eq!(second.status, 201);
}

/// Reads one request, then answers 409 with a body cut short of its
/// declared length and closes the connection.
async fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0_u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        socket
            .write_all(b"HTTP/1.1 409 Conflict\r\ncontent-length: 64\r\n\r\nduplicate")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn unreadable_body_keeps_status_with_empty_body() {
    let base = truncated_body_server().await;

    let outcome = test_sink(&base)
        .upsert_record(&record())
        .await
        .expect("status line was received");

    assert_eq!(outcome.status, 409);
    assert!(outcome.body.is_empty());
    assert!(!outcome.is_success());
}

