//! # Application State
//!
//! Core business state for shortfeed. This module contains domain logic only -
//! no TUI-specific types. Presentation state (selection, scroll, overlays)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn VideoSource>   // where shorts come from
//! ├── query: String                  // fixed search query
//! ├── page_size: u8                  // hits per fetch
//! ├── max_duration_secs: u32         // client-side shorts threshold
//! ├── player_command: Option<String> // external player for hand-off
//! ├── videos: Vec<ShortVideo>        // current page, replaced per fetch
//! ├── status: FeedStatus             // idle / loading / refreshing / failed
//! ├── status_message: String         // status bar text
//! ├── generation: u64                // id of the newest fetch
//! └── last_updated: Option<DateTime> // when `videos` was last replaced
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::core::config::{DEFAULT_MAX_DURATION_SECS, DEFAULT_PAGE_SIZE, ResolvedConfig};
use crate::feed::{ShortVideo, VideoSource};

/// Shown for every failed load, whatever the cause.
pub const FEED_ERROR_MESSAGE: &str = "Couldn't load shorts. Check your connection and try again.";

/// Loading, refreshing and error are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    /// First load (or retry): nothing useful on screen yet.
    Loading,
    /// Pull-to-refresh: the previous page stays visible.
    Refreshing,
    Failed(String),
}

pub struct App {
    pub source: Arc<dyn VideoSource>,
    pub query: String,
    pub page_size: u8,
    pub max_duration_secs: u32,
    pub player_command: Option<String>,
    pub videos: Vec<ShortVideo>,
    pub status: FeedStatus,
    pub status_message: String,
    /// Incremented for every fetch the reducer starts. Results carrying an
    /// older generation are discarded.
    pub generation: u64,
    pub last_updated: Option<DateTime<Local>>,
}

impl App {
    pub fn new(source: Arc<dyn VideoSource>, query: String) -> Self {
        Self {
            source,
            query,
            page_size: DEFAULT_PAGE_SIZE,
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            player_command: None,
            videos: Vec::new(),
            status: FeedStatus::Idle,
            status_message: String::new(),
            generation: 0,
            last_updated: None,
        }
    }

    pub fn from_config(source: Arc<dyn VideoSource>, config: &ResolvedConfig) -> Self {
        Self {
            page_size: config.page_size,
            max_duration_secs: config.max_duration_secs,
            player_command: config.player_command.clone(),
            ..Self::new(source, config.query.clone())
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.status == FeedStatus::Refreshing
    }

    /// True while a fetch started by the reducer has not reported back.
    pub fn is_fetching(&self) -> bool {
        self.is_loading() || self.is_refreshing()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FeedStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn video(&self, id: &str) -> Option<&ShortVideo> {
        self.videos.iter().find(|v| v.id == id)
    }
}
