//! # Actions
//!
//! Everything that can happen in shortfeed becomes an `Action`.
//! User pulls to refresh? That's `Action::Refresh`.
//! The fetch task finishes? That's `Action::FeedLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` telling the adapter what I/O to perform.
//! No network or terminal access happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every fetch is tagged with the generation issued when it was started.
//! A result whose generation is not the newest is stale and is dropped, so an
//! older response can never overwrite a newer one.

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::state::{App, FEED_ERROR_MESSAGE, FeedStatus};
use crate::feed::ShortVideo;

#[derive(Debug)]
pub enum Action {
    /// Initial load. Ignored while a fetch is already running.
    Load,
    /// Pull-to-refresh. Keeps the current page on screen while fetching.
    Refresh,
    /// Manual retry from the error view.
    Retry,
    FeedLoaded {
        generation: u64,
        videos: Vec<ShortVideo>,
        fetched_at: DateTime<Local>,
    },
    FeedFailed {
        generation: u64,
        reason: String,
    },
    /// Navigate to the player for one video id.
    OpenVideo(String),
    Quit,
}

/// Side effects requested by `update()`, carried out by the adapter.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start a fetch tagged with `generation`, superseding any in flight.
    SpawnFetch { generation: u64 },
    OpenPlayer(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Load => {
            if app.is_fetching() {
                debug!("Load ignored: fetch already in flight");
                return Effect::None;
            }
            start_fetch(app, FeedStatus::Loading)
        }
        Action::Refresh => {
            if app.is_loading() {
                debug!("Refresh ignored: initial load in flight");
                return Effect::None;
            }
            start_fetch(app, FeedStatus::Refreshing)
        }
        Action::Retry => {
            if app.error().is_none() {
                return Effect::None;
            }
            start_fetch(app, FeedStatus::Loading)
        }
        Action::FeedLoaded {
            generation,
            videos,
            fetched_at,
        } => {
            if generation != app.generation {
                debug!(
                    "Dropping stale feed result (generation {} < {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            info!("Feed loaded: {} shorts (generation {})", videos.len(), generation);
            app.status_message = format!(
                "{} shorts · updated {}",
                videos.len(),
                fetched_at.format("%H:%M")
            );
            app.videos = videos;
            app.status = FeedStatus::Idle;
            app.last_updated = Some(fetched_at);
            Effect::None
        }
        Action::FeedFailed { generation, reason } => {
            if generation != app.generation {
                debug!(
                    "Dropping stale feed failure (generation {} < {}): {}",
                    generation, app.generation, reason
                );
                return Effect::None;
            }
            warn!("Feed load failed (generation {}): {}", generation, reason);
            app.videos.clear();
            app.status = FeedStatus::Failed(FEED_ERROR_MESSAGE.to_string());
            app.status_message = String::from("Load failed");
            Effect::None
        }
        Action::OpenVideo(id) => {
            if app.video(&id).is_some() {
                Effect::OpenPlayer(id)
            } else {
                warn!("OpenVideo for unknown id {}", id);
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_fetch(app: &mut App, status: FeedStatus) -> Effect {
    app.generation += 1;
    app.status_message = match status {
        FeedStatus::Refreshing => String::from("Refreshing..."),
        _ => String::from("Loading..."),
    };
    app.status = status;
    debug!("Starting fetch generation {}", app.generation);
    Effect::SpawnFetch {
        generation: app.generation,
    }
}
