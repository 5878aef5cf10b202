use std::path::PathBuf;

/// Feeds drained when `SIGSCAN_FEEDS` is not set.
pub const DEFAULT_FEEDS: [&str; 3] = [
    "https://techcrunch.com/feed/",
    "https://sifted.eu/feed/",
    "https://www.eu-startups.com/feed/",
];

#[derive(Clone)]
pub struct AppConfig {
    /// Base address of the `PostgREST` endpoint, without a trailing slash.
    pub supabase_url: String,
    pub supabase_key: String,
    pub table: String,
    pub feeds: Vec<String>,
    pub log_level: String,
    /// Custom heuristics YAML. `None` means the compiled-in tables.
    pub heuristics_path: Option<PathBuf>,
    pub max_entries_per_feed: usize,
    pub sink_timeout_secs: u64,
    pub feed_timeout_secs: u64,
    pub inter_request_delay_ms: u64,
    pub user_agent: String,
    pub persist_domains: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"[redacted]")
            .field("table", &self.table)
            .field("feeds", &self.feeds)
            .field("log_level", &self.log_level)
            .field("heuristics_path", &self.heuristics_path)
            .field("max_entries_per_feed", &self.max_entries_per_feed)
            .field("sink_timeout_secs", &self.sink_timeout_secs)
            .field("feed_timeout_secs", &self.feed_timeout_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("user_agent", &self.user_agent)
            .field("persist_domains", &self.persist_domains)
            .finish()
    }
}
