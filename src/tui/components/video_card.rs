use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::feed::ShortVideo;
use crate::feed::format::format_duration;

/// Rows per card: 2 border rows + 2 title lines + channel + views.
pub const CARD_HEIGHT: u16 = 6;
/// Narrowest card before the grid drops a column.
pub const MIN_CARD_WIDTH: u16 = 28;
/// Horizontal space taken by borders and padding.
const HORIZONTAL_OVERHEAD: u16 = 4;
const TITLE_LINES: usize = 2;

/// A stateless component that renders one short as a bordered card.
///
/// `VideoCard` is a transient component: it's created fresh each frame by
/// `ShortsGrid` for every visible slot and rendered into the grid's
/// `ScrollView` buffer through the `Widget` impl.
///
/// ```text
/// ┌ ▶ 0:45 ──────────────────┐
/// │ Title wraps onto two     │
/// │ lines, then truncates…   │
/// │ Channel name             │
/// │ 1.5K views               │
/// └──────────────────────────┘
/// ```
#[derive(Clone, Copy)]
pub struct VideoCard<'a> {
    pub video: &'a ShortVideo,
    pub is_selected: bool,
}

impl<'a> VideoCard<'a> {
    pub fn new(video: &'a ShortVideo, is_selected: bool) -> Self {
        Self { video, is_selected }
    }

    /// Content lines for a card of the given outer width.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let title_style = if self.is_selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut lines: Vec<Line> = title_lines(&self.video.title, inner)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, title_style)))
            .collect();
        while lines.len() < TITLE_LINES {
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled(
            truncate_to_width(&self.video.channel, inner),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!("{} views", self.video.views), inner),
            Style::default().fg(Color::Gray),
        )));
        lines
    }
}

impl<'a> Widget for VideoCard<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let badge = Span::styled(
            format!(" ▶ {} ", format_duration(self.video.duration_secs)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );

        let block = Block::bordered()
            .border_style(border_style)
            .title(badge)
            .padding(Padding::horizontal(1));

        Paragraph::new(self.lines(area.width))
            .block(block)
            .render(area, buf);
    }
}

/// Wraps a title to at most two lines, marking the cut with an ellipsis.
pub fn title_lines(title: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let wrapped = textwrap::wrap(title.trim(), options);

    let mut lines: Vec<String> = wrapped
        .iter()
        .take(TITLE_LINES)
        .map(|l| l.to_string())
        .collect();

    if wrapped.len() > TITLE_LINES
        && let Some(last) = lines.last_mut()
    {
        // Reserve one column for the ellipsis
        let mut clipped = truncate_to_width(last, width.saturating_sub(1));
        clipped = clipped.trim_end_matches('…').trim_end().to_string();
        clipped.push('…');
        *last = clipped;
    }
    lines
}

/// Truncate to `max_width` display columns, appending `…` if anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
