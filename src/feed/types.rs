use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base for shareable watch links. Shorts open in the vertical player.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/shorts/";

/// One result from the search endpoint, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Statistics and content details for a single video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetails {
    /// Zero when the channel hides its statistics.
    pub view_count: u64,
    /// Raw ISO-8601 duration as returned by the platform (e.g. `PT1M5S`).
    pub duration: String,
}

/// An enriched short, ready for display.
///
/// Built fresh on every fetch and never mutated afterwards. The duration
/// threshold is checked once when the loader constructs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortVideo {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    /// Formatted view count ("1.5K", "2.3M").
    pub views: String,
    pub channel: String,
    pub view_count: u64,
    pub duration_secs: u32,
    pub published_at: Option<DateTime<Utc>>,
}

impl ShortVideo {
    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_BASE}{video_id}")
}
