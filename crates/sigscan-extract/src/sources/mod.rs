//! Feed entry sources.

mod feed;

pub use feed::{parse_feed, FeedClient};

use sigscan_core::FeedEntry;

/// Fetch one feed, logging and swallowing failures.
///
/// Returns `None` when the feed could not be fetched or parsed so the caller
/// can move on to the next one.
pub(crate) async fn fetch_feed_entries(
    client: &FeedClient,
    url: &str,
    max_entries: usize,
) -> Option<Vec<FeedEntry>> {
    match client.fetch(url, max_entries).await {
        Ok(entries) => {
            tracing::debug!(feed = url, count = entries.len(), "fetched feed entries");
            Some(entries)
        }
        Err(e) => {
            tracing::warn!(feed = url, error = %e, "feed fetch failed; skipping");
            None
        }
    }
}
