use std::fmt;

use async_trait::async_trait;

use super::types::{SearchHit, VideoDetails};

/// Errors that can occur while talking to a video source.
/// The TUI collapses all of these into one generic message; the variant
/// only matters for logs.
#[derive(Debug)]
pub enum FeedError {
    /// Source misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response (quota, auth, bad request).
    Api { status: u16, message: String },
    /// Failed to parse the source's response.
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Config(msg) => write!(f, "config error: {msg}"),
            FeedError::Network(msg) => write!(f, "network error: {msg}"),
            FeedError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FeedError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Everything the loader needs to build one page of the feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedRequest<'a> {
    pub query: &'a str,
    pub page_size: u8,
    pub max_duration_secs: u32,
}

#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Searches for short-form videos matching `query`, returning at most `max_results` hits.
    async fn search_shorts(
        &self,
        query: &str,
        max_results: u8,
    ) -> Result<Vec<SearchHit>, FeedError>;

    /// Looks up statistics and content details for one video.
    /// `Ok(None)` means the source has no record of the id.
    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, FeedError>;
}
