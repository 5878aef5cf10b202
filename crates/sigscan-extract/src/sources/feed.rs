//! RSS/Atom feed fetcher.

use std::time::Duration;

use feed_rs::model::Entry;
use sigscan_core::FeedEntry;

use crate::error::ExtractError;

/// HTTP client for syndicated feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
}

impl FeedClient {
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `url` and return at most `max_entries` entries in document order.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Http`] on network failure.
    /// - [`ExtractError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ExtractError::FeedParse`] if the body is not RSS, Atom, or JSON Feed.
    pub async fn fetch(
        &self,
        url: &str,
        max_entries: usize,
    ) -> Result<Vec<FeedEntry>, ExtractError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        parse_feed(&body, url, max_entries)
    }
}

/// Parse a feed document into at most `max_entries` [`FeedEntry`]s.
///
/// `url` is only used for error context.
///
/// # Errors
///
/// Returns [`ExtractError::FeedParse`] if the document is malformed.
pub fn parse_feed(
    body: &[u8],
    url: &str,
    max_entries: usize,
) -> Result<Vec<FeedEntry>, ExtractError> {
    let feed = feed_rs::parser::parse(body).map_err(|source| ExtractError::FeedParse {
        url: url.to_string(),
        source,
    })?;

    Ok(feed
        .entries
        .into_iter()
        .take(max_entries)
        .map(to_feed_entry)
        .collect())
}

fn to_feed_entry(entry: Entry) -> FeedEntry {
    let title = entry.title.map(|t| t.content).unwrap_or_default();
    let link = entry
        .links
        .into_iter()
        .next()
        .map(|l| l.href)
        .unwrap_or_default();
    // Atom feeds sometimes carry only <content>.
    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();

    FeedEntry {
        title,
        link,
        summary,
    }
}
