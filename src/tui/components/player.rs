//! # Player Component
//!
//! Full-screen overlay reached by opening a card. It receives exactly one
//! video and hands playback off to an external player on Enter.
//! Dismissed with Esc (or `q`).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PlayerState` lives in `TuiState`
//! - `PlayerView` is created each frame with borrowed state

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::feed::ShortVideo;
use crate::feed::format::{format_age, format_duration};
use crate::tui::event::TuiEvent;

/// Persistent state for the player overlay.
pub struct PlayerState {
    pub video: ShortVideo,
    /// Outcome of the last launch attempt, shown under the details.
    pub notice: Option<String>,
}

impl PlayerState {
    pub fn new(video: ShortVideo) -> Self {
        Self {
            video,
            notice: None,
        }
    }

    /// Handle a key event, returning a PlayerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PlayerEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Quit => Some(PlayerEvent::Dismiss),
            TuiEvent::Submit => Some(PlayerEvent::Launch(self.video.watch_url())),
            _ => None,
        }
    }
}

/// Events emitted by the player overlay.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Hand the watch URL to the external player.
    Launch(String),
    Dismiss,
}

/// Transient render wrapper for the player overlay.
pub struct PlayerView<'a> {
    state: &'a PlayerState,
    player_label: &'a str,
}

impl<'a> PlayerView<'a> {
    pub fn new(state: &'a PlayerState, player_label: &'a str) -> Self {
        Self {
            state,
            player_label,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let video = &self.state.video;
        let label = Style::default().fg(Color::DarkGray);

        let published = video
            .published_at
            .map(|at| format_age(at, Utc::now()))
            .unwrap_or_else(|| "unknown".to_string());

        let mut lines = vec![
            Line::from(Span::styled(
                video.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Channel   ", label),
                Span::raw(video.channel.clone()),
            ]),
            Line::from(vec![
                Span::styled("Views     ", label),
                Span::raw(format!("{} ({})", video.views, video.view_count)),
            ]),
            Line::from(vec![
                Span::styled("Duration  ", label),
                Span::raw(format_duration(video.duration_secs)),
            ]),
            Line::from(vec![
                Span::styled("Published ", label),
                Span::raw(published),
            ]),
            Line::from(vec![
                Span::styled("Watch     ", label),
                Span::styled(video.watch_url(), Style::default().fg(Color::Cyan)),
            ]),
        ];

        if !video.thumbnail_url.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Thumbnail ", label),
                Span::raw(video.thumbnail_url.clone()),
            ]));
        }

        if let Some(notice) = &self.state.notice {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let help_text = format!(" Enter Play in {}  Esc Back ", self.player_label);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Now Playing ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::uniform(1));

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::short;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_enter_launches_watch_url() {
        let mut state = PlayerState::new(short("abc"));
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(PlayerEvent::Launch(
                "https://www.youtube.com/shorts/abc".to_string()
            ))
        );
    }

    #[test]
    fn test_escape_and_q_dismiss() {
        let mut state = PlayerState::new(short("abc"));
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(PlayerEvent::Dismiss)
        );
        assert_eq!(state.handle_event(&TuiEvent::Quit), Some(PlayerEvent::Dismiss));
        assert_eq!(state.handle_event(&TuiEvent::CursorDown), None);
    }

    #[test]
    fn test_render_shows_details_and_notice() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = PlayerState::new(short("abc"));
        state.notice = Some("Opened in mpv".to_string());

        terminal
            .draw(|f| PlayerView::new(&state, "mpv").render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Now Playing"));
        assert!(text.contains("Video abc"));
        assert!(text.contains("Test Channel"));
        assert!(text.contains("0:42"));
        assert!(text.contains("Opened in mpv"));
        assert!(text.contains("Play in mpv"));
    }
}
