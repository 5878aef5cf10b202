//! Startup-signal extraction for news feed entries.
//!
//! Normalizes headline text, pulls out the most plausible company name and
//! any domains, scores the entry for relevance, and assembles an upsert-ready
//! [`ScoredRecord`](sigscan_core::ScoredRecord). Every heuristic is a pure
//! function of its input and the injected [`Heuristics`](sigscan_core::Heuristics)
//! tables; I/O lives in [`sources`] and [`pipeline`].

pub mod domains;
pub mod error;
pub mod extractor;
pub mod name;
pub mod pipeline;
pub mod record;
pub mod scorer;
pub mod sources;
pub mod text;

pub use domains::{host_from_url, DomainExtractor};
pub use error::ExtractError;
pub use extractor::SignalExtractor;
pub use name::{token_ok, CandidateName, NameExtractor, Strategy};
pub use pipeline::{process_entries, run_pipeline, PipelineOptions, RecordSink, RunSummary};
pub use record::{build_record, external_id, Extraction};
pub use scorer::relevance_score;
pub use sources::{parse_feed, FeedClient};
pub use text::{clean, normalize};
