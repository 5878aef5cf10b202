use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse error for {url}: {source}")]
    FeedParse {
        url: String,
        #[source]
        source: feed_rs::parser::ParseFeedError,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid pattern built from heuristics: {0}")]
    Pattern(#[from] regex::Error),
}
