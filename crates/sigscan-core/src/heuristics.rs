//! Denylists, allowlists, and keyword weights that drive extraction and
//! scoring.
//!
//! The tables live in YAML so they can be tuned without touching the
//! extraction logic. The repository copy at `config/heuristics.yaml` is
//! compiled in as the default.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

const BUILTIN_YAML: &str = include_str!("../../../config/heuristics.yaml");

fn default_scan_window() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct Heuristics {
    /// Maximum number of capitalized sequences the fallback scan considers.
    #[serde(default = "default_scan_window")]
    pub scan_window: usize,
    /// Countries, cities, and demonyms. Case-sensitive; may be multi-word.
    pub geography: HashSet<String>,
    /// Pronouns, question words, and headline filler. Case-sensitive.
    pub noise: HashSet<String>,
    /// Industry words rejected by their lowercase form.
    pub boilerplate: HashSet<String>,
    pub org_suffixes: HashSet<String>,
    pub action_verbs: Vec<String>,
    pub tlds: Vec<String>,
    pub positive_keywords: BTreeMap<String, i32>,
    pub negative_keywords: BTreeMap<String, i32>,
    pub domain_bonus: i32,
    pub risky_suffix: String,
    pub risky_suffix_bonus: i32,
}

impl Heuristics {
    /// The tables shipped in `config/heuristics.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only if the compiled-in YAML is malformed.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(BUILTIN_YAML)
    }

    /// Parse and validate heuristics from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HeuristicsFileParse`] on malformed YAML and
    /// [`ConfigError::Validation`] when a table is unusable.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let heuristics: Heuristics =
            serde_yaml::from_str(content).map_err(ConfigError::HeuristicsFileParse)?;
        validate_heuristics(&heuristics)?;
        Ok(heuristics)
    }

    /// True if `token` is rejected as a place name.
    #[must_use]
    pub fn is_geography(&self, token: &str) -> bool {
        self.geography.contains(token)
    }

    #[must_use]
    pub fn is_noise(&self, token: &str) -> bool {
        self.noise.contains(token)
    }

    #[must_use]
    pub fn is_boilerplate(&self, token: &str) -> bool {
        self.boilerplate.contains(&token.to_lowercase())
    }

    #[must_use]
    pub fn is_org_suffix(&self, token: &str) -> bool {
        self.org_suffixes.contains(token)
    }
}

/// Load heuristics from `path`, or the built-in tables when `path` is `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_heuristics(path: Option<&Path>) -> Result<Heuristics, ConfigError> {
    let Some(path) = path else {
        return Heuristics::builtin();
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HeuristicsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    Heuristics::from_yaml(&content)
}

/// Largest magnitude any single weight or bonus may have. Scores live in
/// `[0, 100]`, so anything larger only risks overflow.
pub const MAX_WEIGHT: i32 = 100;

fn validate_heuristics(h: &Heuristics) -> Result<(), ConfigError> {
    if h.scan_window == 0 {
        return Err(ConfigError::Validation(
            "scan_window must be at least 1".to_string(),
        ));
    }

    // Verbs and TLDs are spliced into regex alternations.
    validate_word_list("action_verbs", &h.action_verbs)?;
    validate_word_list("tlds", &h.tlds)?;

    for (keyword, weight) in &h.positive_keywords {
        validate_keyword("positive_keywords", keyword)?;
        if *weight <= 0 {
            return Err(ConfigError::Validation(format!(
                "positive keyword '{keyword}' has non-positive weight {weight}"
            )));
        }
        validate_weight("positive_keywords", keyword, *weight)?;
    }

    for (keyword, weight) in &h.negative_keywords {
        validate_keyword("negative_keywords", keyword)?;
        if *weight >= 0 {
            return Err(ConfigError::Validation(format!(
                "negative keyword '{keyword}' has non-negative weight {weight}"
            )));
        }
        validate_weight("negative_keywords", keyword, *weight)?;
    }

    validate_weight("bonuses", "domain_bonus", h.domain_bonus)?;
    validate_weight("bonuses", "risky_suffix_bonus", h.risky_suffix_bonus)?;

    if !h.risky_suffix.starts_with('.') || h.risky_suffix.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "risky_suffix '{}' must look like '.tld'",
            h.risky_suffix
        )));
    }

    Ok(())
}

fn validate_weight(table: &str, key: &str, weight: i32) -> Result<(), ConfigError> {
    if !(-MAX_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        return Err(ConfigError::Validation(format!(
            "{table}: '{key}' weight {weight} is outside -{MAX_WEIGHT}..={MAX_WEIGHT}"
        )));
    }
    Ok(())
}

fn validate_word_list(table: &str, words: &[String]) -> Result<(), ConfigError> {
    if words.is_empty() {
        return Err(ConfigError::Validation(format!("{table} must be non-empty")));
    }

    let mut seen = HashSet::new();
    for word in words {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "{table} entry '{word}' must be ASCII letters or digits"
            )));
        }
        if !seen.insert(word.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {table} entry: '{word}'"
            )));
        }
    }

    Ok(())
}

fn validate_keyword(table: &str, keyword: &str) -> Result<(), ConfigError> {
    if keyword.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{table} contains an empty keyword"
        )));
    }
    if keyword != keyword.to_lowercase() {
        return Err(ConfigError::Validation(format!(
            "{table} keyword '{keyword}' must be lowercase"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "heuristics_test.rs"]
mod tests;
