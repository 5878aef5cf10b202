//! Domain extraction from free text and source links.
//!
//! Only hostnames ending in an allow-listed suffix are accepted. The list is
//! deliberately short so version strings and abbreviations such as `Q3.2`
//! never read as domains.

use std::collections::BTreeSet;

use regex::Regex;
use reqwest::Url;

use crate::error::ExtractError;

/// Compiled domain scanner for one TLD allow-list.
#[derive(Debug, Clone)]
pub struct DomainExtractor {
    pattern: Regex,
}

impl DomainExtractor {
    /// Build the scanner for the given suffixes.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] if a suffix breaks the regex. Suffixes
    /// validated by `sigscan_core::Heuristics` never do.
    pub fn new(tlds: &[String]) -> Result<Self, ExtractError> {
        let alternation = tlds
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"(?i)\b((?:[a-z0-9-]+\.)+(?:{alternation}))\b"
        ))?;
        Ok(Self { pattern })
    }

    /// Every domain-like substring of `text`, lowercased, `www.` stripped.
    #[must_use]
    pub fn extract_domains(&self, text: &str) -> BTreeSet<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| strip_www(&m.as_str().to_lowercase()).to_string())
            .collect()
    }

    /// Domains from the title, the summary, and the link host, keeping only
    /// entries that contain a dot.
    #[must_use]
    pub fn collect_domains(&self, title: &str, summary: &str, link: &str) -> BTreeSet<String> {
        let mut domains = self.extract_domains(title);
        domains.extend(self.extract_domains(summary));
        if let Some(host) = host_from_url(link) {
            domains.insert(host);
        }
        domains.retain(|d| !d.is_empty() && d.contains('.'));
        domains
    }
}

/// Lowercase hostname of `url` without port or leading `www.`.
///
/// Returns `None` when the URL does not parse or has no host.
#[must_use]
pub fn host_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = strip_www(&host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Strips every leading `www.` so the result is stable under re-extraction.
/// A bare `www.<tld>` is left alone.
fn strip_www(mut host: &str) -> &str {
    while let Some(rest) = host.strip_prefix("www.").filter(|r| r.contains('.')) {
        host = rest;
    }
    host
}
