//! `extract` and `heuristics` commands for tuning the heuristic tables.

use std::path::Path;

use chrono::Utc;
use sigscan_core::{load_dry_run_config, load_heuristics, FeedEntry, Heuristics};
use sigscan_extract::{clean, CandidateName, SignalExtractor};

use crate::init_tracing;

/// Print the record one headline would produce, or a note that it has no name.
///
/// # Errors
///
/// Returns an error if configuration or heuristics fail to load.
pub(crate) fn run_extract(title: &str, summary: &str, link: &str) -> anyhow::Result<()> {
    let config = load_dry_run_config()?;
    init_tracing(&config.log_level)?;

    let extractor = SignalExtractor::new(load_heuristics(config.heuristics_path.as_deref())?)?;
    let entry = FeedEntry::new(title, link, summary);

    tracing::debug!(candidates = ?fallback_candidates(&extractor, title), "fallback candidates");

    match extractor.assemble(&entry, config.persist_domains, Utc::now()) {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("no company name"),
    }
    Ok(())
}

/// Load and validate a heuristics file, then print how many entries each
/// table holds.
///
/// # Errors
///
/// Returns an error if the file is unreadable, malformed, fails validation,
/// or produces patterns that do not compile.
pub(crate) fn run_heuristics(path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_dry_run_config()?;
    init_tracing(&config.log_level)?;

    let path = path.or(config.heuristics_path.as_deref());
    let heuristics = load_heuristics(path)?;
    let report = summarize(&heuristics);
    SignalExtractor::new(heuristics)?;

    match path {
        Some(p) => println!("heuristics: {}", p.display()),
        None => println!("heuristics: built-in"),
    }
    println!("{report}");
    Ok(())
}

/// Fallback-scan candidates over the same cleaned title `extract` uses.
fn fallback_candidates(extractor: &SignalExtractor, title: &str) -> Vec<CandidateName> {
    extractor.candidates(&clean(title))
}

fn summarize(h: &Heuristics) -> String {
    [
        format!("scan_window        {}", h.scan_window),
        format!("geography          {}", h.geography.len()),
        format!("noise              {}", h.noise.len()),
        format!("boilerplate        {}", h.boilerplate.len()),
        format!("org_suffixes       {}", h.org_suffixes.len()),
        format!("action_verbs       {}", h.action_verbs.len()),
        format!("tlds               {}", h.tlds.len()),
        format!("positive_keywords  {}", h.positive_keywords.len()),
        format!("negative_keywords  {}", h.negative_keywords.len()),
        format!(
            "domain_bonus       {} ({} +{})",
            h.domain_bonus, h.risky_suffix, h.risky_suffix_bonus
        ),
    ]
    .join("\n")
}
