//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the feed,
//! translates keyboard and mouse events into core::Action values, and
//! carries out the `Effect`s the reducer returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (fetch in flight, pull in progress): draws every ~80ms so
//!   the spinner and banner stay live.
//! - **Idle**: sleeps up to 500ms and only redraws on input, resize, or a
//!   fetch result.
//!
//! ## Fetch Tasks
//!
//! Each `Effect::SpawnFetch` starts a tokio task that runs the feed loader
//! and reports back over an mpsc channel. Starting a new fetch aborts the
//! previous task; the reducer also drops any result whose generation is
//! stale, so a straggler that finishes before the abort lands is harmless.

mod component;
mod components;
mod event;
pub mod playback;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use chrono::Local;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::feed::{FeedError, FeedRequest, VideoSource, YouTubeSource, load_feed};
use crate::tui::component::EventHandler;
use crate::tui::components::{GridEvent, PlayerEvent, PlayerState, ShortsGridState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub grid: ShortsGridState,
    /// Player overlay (None = feed screen)
    pub player: Option<PlayerState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            grid: ShortsGridState::new(),
            player: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture is needed for wheel scrolling and pull-to-refresh
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Build the video source from a resolved config.
pub fn build_source(config: &ResolvedConfig) -> Result<Arc<dyn VideoSource>, FeedError> {
    let api_key = config.youtube_api_key.clone().ok_or_else(|| {
        FeedError::Config(
            "YouTube API key must be set (YOUTUBE_API_KEY env var or [youtube] api_key in ~/.shortfeed/config.toml)"
                .to_string(),
        )
    })?;
    Ok(Arc::new(YouTubeSource::new(
        api_key,
        Some(config.youtube_base_url.clone()),
    )))
}

pub fn run(config: ResolvedConfig, source: Arc<dyn VideoSource>) -> std::io::Result<()> {
    let mut app = App::from_config(source, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the fetch currently in flight
    let mut active_fetch: Option<tokio::task::AbortHandle> = None;

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    let mut should_quit = dispatch(&mut app, &mut tui, Action::Load, &tx, &mut active_fetch);

    while !should_quit {
        tui.grid.sync_len(app.videos.len());

        let animating = app.is_fetching() || tui.grid.pull_distance > 0;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&event, &app, &mut tui) else {
                continue;
            };
            if dispatch(&mut app, &mut tui, action, &tx, &mut active_fetch) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let shown_before = app.last_updated;
            if dispatch(&mut app, &mut tui, action, &tx, &mut active_fetch) {
                should_quit = true;
            }
            if app.last_updated != shown_before {
                // A new page replaced the old one
                tui.grid.reset();
            }
        }
    }

    if let Some(handle) = active_fetch.take() {
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Translate a terminal event into a core action, handling TUI-local
/// events (scrolling, selection, overlay) in place.
fn route_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    // Resize just needs a redraw (already flagged by the caller)
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    // ForceQuit (Ctrl+C) always quits, even over the overlay
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    // When the player overlay is open, route all events to it
    if let Some(player) = tui.player.as_mut() {
        match player.handle_event(event)? {
            PlayerEvent::Launch(url) => match playback::launch(&url, app.player_command.as_deref()) {
                Ok(()) => {
                    player.notice = Some(format!(
                        "Opened in {}",
                        playback::player_label(app.player_command.as_deref())
                    ));
                }
                Err(e) => {
                    warn!("Failed to launch player for {}: {}", url, e);
                    player.notice = Some(format!("Couldn't start player: {e}"));
                }
            },
            PlayerEvent::Dismiss => tui.player = None,
        }
        return None;
    }

    match event {
        TuiEvent::Quit | TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::Refresh | TuiEvent::Submit if app.error().is_some() => Some(Action::Retry),
        TuiEvent::Refresh => Some(Action::Refresh),
        _ => match tui.grid.handle_event(event)? {
            GridEvent::Open(index) => app
                .videos
                .get(index)
                .map(|video| Action::OpenVideo(video.id.clone())),
            GridEvent::Refresh => Some(Action::Refresh),
        },
    }
}

/// Run an action through the reducer and carry out its effect.
/// Returns true when the app should quit.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    tx: &mpsc::Sender<Action>,
    active_fetch: &mut Option<tokio::task::AbortHandle>,
) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnFetch { generation } => {
            if let Some(previous) = active_fetch.take() {
                debug!("Aborting superseded fetch");
                previous.abort();
            }
            *active_fetch = Some(spawn_fetch(app, generation, tx.clone()));
            false
        }
        Effect::OpenPlayer(id) => {
            if let Some(video) = app.video(&id) {
                info!("Opening player for {}", id);
                tui.player = Some(PlayerState::new(video.clone()));
            }
            false
        }
    }
}

fn spawn_fetch(app: &App, generation: u64, tx: mpsc::Sender<Action>) -> tokio::task::AbortHandle {
    info!("Spawning feed fetch (generation {})", generation);

    // Clone what we need for the async task
    let source = app.source.clone();
    let query = app.query.clone();
    let page_size = app.page_size;
    let max_duration_secs = app.max_duration_secs;

    let handle = tokio::spawn(async move {
        let request = FeedRequest {
            query: &query,
            page_size,
            max_duration_secs,
        };

        let action = match load_feed(source.as_ref(), request).await {
            Ok(videos) => Action::FeedLoaded {
                generation,
                videos,
                fetched_at: Local::now(),
            },
            Err(e) => {
                info!("Feed fetch error: {}", e);
                Action::FeedFailed {
                    generation,
                    reason: e.to_string(),
                }
            }
        };

        if tx.send(action).is_err() {
            warn!("Failed to send fetch result: receiver dropped");
        }
    });

    handle.abort_handle()
}
