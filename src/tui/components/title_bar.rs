//! # TitleBar Component
//!
//! Top status bar: app name, the fixed search query, and the transient
//! status message. While a pull-to-refresh is running the bar shows a
//! refresh marker so the user knows the grid below is about to change.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state.
//!
//! 1. **Refreshing**: `"shortfeed · #cats | Refreshing... | ↻"`
//! 2. **Status message**: `"shortfeed · #cats | 20 shorts · updated 14:02"`
//! 3. **Default**: `"shortfeed · #cats"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub query: String,
    pub status_message: String,
    pub is_refreshing: bool,
}

impl TitleBar {
    pub fn new(query: String, status_message: String, is_refreshing: bool) -> Self {
        Self {
            query,
            status_message,
            is_refreshing,
        }
    }

    fn text(&self) -> String {
        let base = format!("shortfeed · #{}", self.query);
        if self.is_refreshing {
            format!("{} | {} | ↻", base, self.status_message)
        } else if self.status_message.is_empty() {
            base
        } else {
            format!("{} | {}", base, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().add_modifier(Modifier::BOLD).fg(Color::White),
        ));
        frame.render_widget(line, area);
    }
}
