//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::state::App;
use crate::feed::{FeedError, SearchHit, ShortVideo, VideoDetails, VideoSource};

/// An in-memory source with scripted search hits and per-id detail outcomes.
/// Ids without a scripted outcome resolve to `Ok(None)`.
pub struct FakeSource {
    hits: Option<Vec<SearchHit>>,
    details: HashMap<String, Option<VideoDetails>>,
    details_calls: AtomicUsize,
    stall_details: bool,
}

impl FakeSource {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits: Some(hits),
            details: HashMap::new(),
            details_calls: AtomicUsize::new(0),
            stall_details: false,
        }
    }

    /// A source whose search request always fails with a network error.
    pub fn failing_search() -> Self {
        Self {
            hits: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_details(mut self, id: &str, view_count: u64, duration: &str) -> Self {
        self.details.insert(
            id.to_string(),
            Some(VideoDetails {
                view_count,
                duration: duration.to_string(),
            }),
        );
        self
    }

    pub fn with_failing_details(mut self, id: &str) -> Self {
        self.details.insert(id.to_string(), None);
        self
    }

    /// A source whose detail lookups never complete, keeping a fetch in flight.
    pub fn stalled(hits: Vec<SearchHit>) -> Self {
        Self {
            stall_details: true,
            ..Self::new(hits)
        }
    }

    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search_shorts(
        &self,
        _query: &str,
        _max_results: u8,
    ) -> Result<Vec<SearchHit>, FeedError> {
        self.hits
            .clone()
            .ok_or_else(|| FeedError::Network("connection refused".to_string()))
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, FeedError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_details {
            futures::future::pending::<()>().await;
        }
        match self.details.get(video_id) {
            Some(Some(details)) => Ok(Some(details.clone())),
            Some(None) => Err(FeedError::Api {
                status: 500,
                message: "backend error".to_string(),
            }),
            None => Ok(None),
        }
    }
}

/// A search hit with placeholder snippet fields.
pub fn hit(id: &str) -> SearchHit {
    SearchHit {
        video_id: id.to_string(),
        title: format!("Video {id}"),
        channel_title: "Test Channel".to_string(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"),
        published_at: None,
    }
}

/// A display-ready short with placeholder fields.
pub fn short(id: &str) -> ShortVideo {
    ShortVideo {
        id: id.to_string(),
        title: format!("Video {id}"),
        thumbnail_url: String::new(),
        views: "1.5K".to_string(),
        channel: "Test Channel".to_string(),
        view_count: 1500,
        duration_secs: 42,
        published_at: None,
    }
}

/// Creates a test App backed by an empty FakeSource.
pub fn test_app() -> App {
    App::new(Arc::new(FakeSource::new(Vec::new())), "test query".to_string())
}
