//! `PostgREST` upsert sink for assembled startup records.

pub mod client;
pub mod error;

pub use client::SupabaseSink;
pub use error::SinkError;
