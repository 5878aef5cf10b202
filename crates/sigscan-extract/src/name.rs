//! Company-name extraction from headline text.
//!
//! Strategies run in a fixed order and the first hit wins:
//!
//! 1. [`Strategy::Possessive`]: the headline opens with `Name's`.
//! 2. [`Strategy::LeadingVerb`]: the headline opens with `Name raises`,
//!    `Name acquired`, and so on.
//! 3. [`Strategy::FallbackScan`]: every capitalized run of one to three words
//!    is filtered, scored, and the best one kept.
//!
//! Whatever a strategy returns is then rejected if it is itself a geography or
//! noise entry.

use regex::{Match, Regex};
use sigscan_core::Heuristics;

use crate::error::ExtractError;
use crate::text::normalize;

/// One to three capitalized ASCII words separated by single whitespace.
const CAPITALIZED_RUN: &str = r"[A-Z][A-Za-z]+(?:\s[A-Z][A-Za-z]+){0,2}";

const MULTI_WORD_BONUS: i32 = 6;
const LONG_NAME_BONUS: i32 = 3;
const LONG_NAME_CHARS: usize = 6;
const ACTION_VERB_BONUS: i32 = 8;
const GEOGRAPHY_PENALTY: i32 = -20;

/// Name-extraction rules, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Possessive,
    LeadingVerb,
    FallbackScan,
}

impl Strategy {
    pub const ORDERED: [Strategy; 3] = [
        Strategy::Possessive,
        Strategy::LeadingVerb,
        Strategy::FallbackScan,
    ];
}

/// A capitalized run that survived the token filter, with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateName {
    /// Candidate text after corporate suffixes were removed.
    pub name: String,
    /// Byte offset in the normalized title just past the matched run.
    pub end: usize,
    pub score: i32,
}

/// Compiled patterns for one action-verb list.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    possessive: Regex,
    leading_verb: Regex,
    capitalized: Regex,
    followed_by_verb: Regex,
}

impl NameExtractor {
    /// Compile the strategy patterns for the given action verbs.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] if the verb list breaks a regex.
    pub fn new(action_verbs: &[String]) -> Result<Self, ExtractError> {
        let verbs = action_verbs
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            possessive: Regex::new(&format!(r"^({CAPITALIZED_RUN})'s\b"))?,
            leading_verb: Regex::new(&format!(r"^({CAPITALIZED_RUN})\s+(?i:{verbs})\b"))?,
            capitalized: Regex::new(&format!(r"\b{CAPITALIZED_RUN}\b"))?,
            followed_by_verb: Regex::new(&format!(r"^\s+(?i:{verbs})\b"))?,
        })
    }

    /// Pick the most plausible company name in `title`, if any.
    #[must_use]
    pub fn extract_name(&self, title: &str, h: &Heuristics) -> Option<String> {
        let text = prepare(title);
        if text.is_empty() {
            return None;
        }

        Strategy::ORDERED
            .iter()
            .find_map(|strategy| self.apply(*strategy, &text, h))
            .filter(|name| !h.is_geography(name) && !h.is_noise(name))
    }

    /// Run a single strategy against an already-prepared title.
    fn apply(&self, strategy: Strategy, text: &str, h: &Heuristics) -> Option<String> {
        match strategy {
            Strategy::Possessive => leading_match(&self.possessive, text, h),
            Strategy::LeadingVerb => leading_match(&self.leading_verb, text, h),
            Strategy::FallbackScan => best_candidate(self.scan_candidates(text, h)),
        }
    }

    /// Scored fallback candidates in encounter order, limited to the
    /// heuristics' scan window. Exposed for diagnostics.
    #[must_use]
    pub fn candidates(&self, title: &str, h: &Heuristics) -> Vec<CandidateName> {
        self.scan_candidates(&prepare(title), h)
    }

    fn scan_candidates(&self, text: &str, h: &Heuristics) -> Vec<CandidateName> {
        self.capitalized
            .find_iter(text)
            .take(h.scan_window)
            .filter_map(|run| self.score_run(run, text, h))
            .collect()
    }

    fn score_run(&self, run: Match<'_>, text: &str, h: &Heuristics) -> Option<CandidateName> {
        let tokens: Vec<&str> = run
            .as_str()
            .split_whitespace()
            .filter(|t| !h.is_org_suffix(t))
            .collect();
        if tokens.is_empty() || !tokens.iter().all(|t| token_ok(t, h)) {
            return None;
        }

        let name = tokens.join(" ");
        let mut score = 0;
        if tokens.len() >= 2 {
            score += MULTI_WORD_BONUS;
        }
        if name.chars().count() >= LONG_NAME_CHARS {
            score += LONG_NAME_BONUS;
        }
        if self.followed_by_verb.is_match(&text[run.end()..]) {
            score += ACTION_VERB_BONUS;
        }
        if h.is_geography(&name) {
            score += GEOGRAPHY_PENALTY;
        }

        Some(CandidateName {
            name,
            end: run.end(),
            score,
        })
    }
}

/// Whether a single token may be part of a company name.
#[must_use]
pub fn token_ok(token: &str, h: &Heuristics) -> bool {
    let len = token.chars().count();
    if len < 3 {
        return false;
    }
    if token.chars().any(char::is_numeric) {
        return false;
    }
    // short all-caps acronyms such as CEO or IPO
    if is_all_uppercase(token) && len <= 4 {
        return false;
    }
    if h.is_geography(token) || h.is_noise(token) {
        return false;
    }
    !h.is_boilerplate(token)
}

fn is_all_uppercase(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

/// Curly apostrophes become ASCII so `'s` matches either form.
fn prepare(title: &str) -> String {
    normalize(&title.replace('\u{2019}', "'"))
}

fn leading_match(pattern: &Regex, text: &str, h: &Heuristics) -> Option<String> {
    let candidate = pattern.captures(text)?.get(1)?.as_str();
    candidate
        .split_whitespace()
        .all(|t| token_ok(t, h))
        .then(|| candidate.to_string())
}

/// Highest score wins; ties go to the earliest candidate.
fn best_candidate(candidates: Vec<CandidateName>) -> Option<String> {
    let mut best: Option<CandidateName> = None;
    for candidate in candidates {
        if best.as_ref().is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.map(|c| c.name)
}

#[cfg(test)]
#[path = "name_test.rs"]
mod tests;
