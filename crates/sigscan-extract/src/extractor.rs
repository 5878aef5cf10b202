//! One configured entry point over the name, domain, and score heuristics.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sigscan_core::{FeedEntry, Heuristics, ScoredRecord};

use crate::domains::DomainExtractor;
use crate::error::ExtractError;
use crate::name::{CandidateName, NameExtractor};
use crate::record::{build_record, Extraction};
use crate::scorer::relevance_score;
use crate::text::clean;

/// Heuristic tables plus the regexes compiled from them.
///
/// Holds no mutable state; every method is a pure function of its arguments
/// and the tables supplied at construction.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    heuristics: Heuristics,
    names: NameExtractor,
    domains: DomainExtractor,
}

impl SignalExtractor {
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] if the verb or TLD lists cannot be
    /// compiled into regexes.
    pub fn new(heuristics: Heuristics) -> Result<Self, ExtractError> {
        let names = NameExtractor::new(&heuristics.action_verbs)?;
        let domains = DomainExtractor::new(&heuristics.tlds)?;
        Ok(Self {
            heuristics,
            names,
            domains,
        })
    }

    #[must_use]
    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    #[must_use]
    pub fn extract_name(&self, title: &str) -> Option<String> {
        self.names.extract_name(title, &self.heuristics)
    }

    #[must_use]
    pub fn candidates(&self, title: &str) -> Vec<CandidateName> {
        self.names.candidates(title, &self.heuristics)
    }

    #[must_use]
    pub fn extract_domains(&self, text: &str) -> BTreeSet<String> {
        self.domains.extract_domains(text)
    }

    #[must_use]
    pub fn score(&self, title: &str, summary: &str, domains: &BTreeSet<String>) -> u8 {
        relevance_score(title, summary, domains, &self.heuristics)
    }

    /// Run every heuristic over one entry. `None` when no name survives.
    ///
    /// The title is entity-decoded before name extraction because feeds often
    /// double-escape apostrophes. Domains are scanned in the raw summary so
    /// hostnames inside `href` attributes still count.
    #[must_use]
    pub fn extract(&self, entry: &FeedEntry) -> Option<Extraction> {
        let title = clean(&entry.title);
        let name = self.extract_name(&title)?;

        let domains = self
            .domains
            .collect_domains(&entry.title, &entry.summary, &entry.link);
        let rank_score = self.score(&title, &clean(&entry.summary), &domains);

        Some(Extraction {
            name,
            domains: domains.into_iter().collect(),
            rank_score,
        })
    }

    /// [`Self::extract`] followed by [`build_record`].
    #[must_use]
    pub fn assemble(
        &self,
        entry: &FeedEntry,
        persist_domains: bool,
        now: DateTime<Utc>,
    ) -> Option<ScoredRecord> {
        let extraction = self.extract(entry)?;
        Some(build_record(entry, extraction, persist_domains, now))
    }
}
