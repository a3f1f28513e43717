//! # Status View Component
//!
//! Fills the main area when there is no grid to show: first load, a failed
//! load (with the retry hint), or an empty result page.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum StatusView<'a> {
    Loading { spinner_frame: usize },
    Error { message: &'a str },
    Empty { query: &'a str },
}

impl<'a> StatusView<'a> {
    fn lines(&self) -> Vec<Line<'a>> {
        match self {
            StatusView::Loading { spinner_frame } => {
                let frame = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
                vec![Line::from(vec![
                    Span::styled(frame, Style::default().fg(Color::Cyan)),
                    Span::raw(" Loading shorts..."),
                ])]
            }
            StatusView::Error { message } => vec![
                Line::from(Span::styled(
                    *message,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "Press r or Enter to retry",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            StatusView::Empty { query } => vec![
                Line::from(format!("No shorts found for \"{query}\".")),
                Line::default(),
                Line::from(Span::styled(
                    "Press r to refresh",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        }
    }
}

impl<'a> Component for StatusView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let height = lines.len() as u16 + 2;

        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        let mut paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        if matches!(self, StatusView::Error { .. }) {
            paragraph = paragraph.block(
                Block::bordered()
                    .title(" Error ")
                    .border_style(Style::default().fg(Color::Red)),
            );
        }

        frame.render_widget(paragraph, centered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(mut view: StatusView) -> String {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_loading_view() {
        let text = render_text(StatusView::Loading { spinner_frame: 13 });
        assert!(text.contains("Loading shorts"));
    }

    #[test]
    fn test_error_view_offers_retry() {
        let text = render_text(StatusView::Error {
            message: "Couldn't load",
        });
        assert!(text.contains("Couldn't load"));
        assert!(text.contains("retry"));
        assert!(text.contains("Error"));
    }

    #[test]
    fn test_empty_view_names_query() {
        let text = render_text(StatusView::Empty { query: "cats" });
        assert!(text.contains("No shorts found for \"cats\""));
    }
}
