//! # ShortsGrid Component
//!
//! Scrollable grid of `VideoCard`s with keyboard selection, mouse hit testing
//! and pull-to-refresh.
//!
//! ## Architecture
//!
//! `ShortsGrid` is a transient component (created each frame) that wraps
//! `&'a mut ShortsGridState` (persistent state) and the current video slice
//! (props). The render pass records the column count and viewport so that
//! events arriving before the next frame navigate the same layout the user
//! is looking at.
//!
//! ## Pull-to-refresh
//!
//! Wheel-up while the grid is already scrolled to the top "pulls" the list.
//! Each notch adds to `pull_distance`; reaching `PULL_THRESHOLD` emits
//! `GridEvent::Refresh` and resets it. Any other scroll resets the pull.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::feed::ShortVideo;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::video_card::{CARD_HEIGHT, MIN_CARD_WIDTH, VideoCard};
use crate::tui::event::TuiEvent;

/// Wheel notches at the top needed to trigger a refresh.
pub const PULL_THRESHOLD: u8 = 3;

/// Number of card columns that fit in `width`.
pub fn columns_for_width(width: u16) -> usize {
    (width / MIN_CARD_WIDTH).max(1) as usize
}

/// Selection, scroll and measured layout for the grid.
/// Must be persisted in the parent TuiState.
pub struct ShortsGridState {
    pub scroll_state: ScrollViewState,
    pub selected: usize,
    /// Number of videos currently displayed (synced from App each loop)
    pub item_count: usize,
    /// Columns from the last render
    pub columns: usize,
    /// Card width from the last render
    pub card_width: u16,
    /// Screen area from the last render (for hit testing)
    pub area: Rect,
    pub pull_distance: u8,
}

impl Default for ShortsGridState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortsGridState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected: 0,
            item_count: 0,
            columns: 1,
            card_width: MIN_CARD_WIDTH,
            area: Rect::default(),
            pull_distance: 0,
        }
    }

    /// Sync the item count after the feed changes, keeping the selection in range.
    pub fn sync_len(&mut self, item_count: usize) {
        if item_count == self.item_count {
            return;
        }
        if item_count < self.item_count || self.item_count == 0 {
            // New page: start from the top
            self.selected = 0;
            self.scroll_state.scroll_to_top();
        }
        self.item_count = item_count;
        self.selected = self.selected.min(item_count.saturating_sub(1));
    }

    /// Reset selection and scroll, e.g. after a refresh replaced the page.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.pull_distance = 0;
        self.scroll_state.scroll_to_top();
    }

    /// Record the layout for a render area.
    pub fn measure(&mut self, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar
        self.columns = columns_for_width(content_width);
        self.card_width = content_width / self.columns as u16;
        self.area = area;
    }

    fn rows(&self) -> usize {
        self.item_count.div_ceil(self.columns.max(1))
    }

    pub fn content_height(&self) -> u16 {
        (self.rows() as u16).saturating_mul(CARD_HEIGHT)
    }

    /// Rect of card `index` inside the scroll canvas.
    pub fn card_rect(&self, index: usize) -> Rect {
        let col = (index % self.columns) as u16;
        let row = (index / self.columns) as u16;
        Rect::new(
            col * self.card_width,
            row * CARD_HEIGHT,
            self.card_width,
            CARD_HEIGHT,
        )
    }

    fn max_offset(&self) -> u16 {
        self.content_height().saturating_sub(self.area.height)
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll so the selected card's row is fully visible.
    pub fn scroll_to_selected(&mut self) {
        if self.item_count == 0 {
            return;
        }
        let row_top = (self.selected / self.columns) as u16 * CARD_HEIGHT;
        let row_bottom = row_top + CARD_HEIGHT;
        let offset_y = self.scroll_state.offset().y;

        if row_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: row_top });
        } else if row_bottom > offset_y + self.area.height {
            let new_y = row_bottom.saturating_sub(self.area.height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Map a screen coordinate to a card index, if one is there.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.area;
        if column < area.x
            || column >= area.x + area.width.saturating_sub(1)
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let content_x = column - area.x;
        let content_y = (row - area.y) + self.scroll_state.offset().y;

        let col = (content_x / self.card_width.max(1)) as usize;
        if col >= self.columns {
            return None;
        }
        let index = (content_y / CARD_HEIGHT) as usize * self.columns + col;
        (index < self.item_count).then_some(index)
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.scroll_to_selected();
    }

    fn move_up(&mut self) {
        if self.selected >= self.columns {
            self.select(self.selected - self.columns);
        }
    }

    fn move_down(&mut self) {
        let last = self.item_count.saturating_sub(1);
        let below = self.selected + self.columns;
        if below <= last {
            self.select(below);
        } else if self.selected / self.columns < last / self.columns {
            // Partial last row: land on its final card
            self.select(last);
        }
    }
}

/// Events emitted by the grid.
#[derive(Debug, PartialEq, Eq)]
pub enum GridEvent {
    /// Open the card at this index.
    Open(usize),
    Refresh,
}

impl EventHandler for ShortsGridState {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !matches!(event, TuiEvent::ScrollUp) {
            self.pull_distance = 0;
        }

        match event {
            TuiEvent::ScrollUp => {
                if self.scroll_state.offset().y == 0 {
                    self.pull_distance += 1;
                    if self.pull_distance >= PULL_THRESHOLD {
                        self.pull_distance = 0;
                        return Some(GridEvent::Refresh);
                    }
                } else {
                    self.pull_distance = 0;
                    self.scroll_state.scroll_up();
                }
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
                None
            }
            _ if self.item_count == 0 => None,
            TuiEvent::CursorLeft => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorRight => {
                self.select((self.selected + 1).min(self.item_count - 1));
                None
            }
            TuiEvent::CursorUp => {
                self.move_up();
                None
            }
            TuiEvent::CursorDown => {
                self.move_down();
                None
            }
            TuiEvent::Submit => Some(GridEvent::Open(self.selected)),
            TuiEvent::MouseClick(column, row) => {
                let index = self.hit_test(*column, *row)?;
                if index == self.selected {
                    Some(GridEvent::Open(index))
                } else {
                    self.select(index);
                    None
                }
            }
            _ => None,
        }
    }
}

/// Scrollable grid view. Created fresh each frame with references to state and data.
pub struct ShortsGrid<'a> {
    pub state: &'a mut ShortsGridState,
    pub videos: &'a [ShortVideo],
    pub is_refreshing: bool,
}

impl<'a> ShortsGrid<'a> {
    pub fn new(state: &'a mut ShortsGridState, videos: &'a [ShortVideo], is_refreshing: bool) -> Self {
        Self {
            state,
            videos,
            is_refreshing,
        }
    }

    /// Banner shown over the first row while pulling or refreshing.
    fn pull_banner(&self) -> Option<String> {
        if self.is_refreshing {
            Some("↻ Refreshing...".to_string())
        } else if self.state.pull_distance > 0 {
            Some(format!(
                "↓ Pull to refresh ({}/{})",
                self.state.pull_distance, PULL_THRESHOLD
            ))
        } else {
            None
        }
    }
}

impl<'a> Component for ShortsGrid<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // 1. Measure (Internal Mutation)
        self.state.item_count = self.videos.len();
        self.state.measure(area);
        self.state.clamp_scroll();

        let content_width = area.width.saturating_sub(1);
        let content_height = self.state.content_height();

        // 2. Render only the visible rows into the ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let offset_y = self.state.scroll_state.offset().y;
        let first_row = (offset_y / CARD_HEIGHT) as usize;
        let visible_rows = (area.height / CARD_HEIGHT) as usize + 2;
        let columns = self.state.columns;
        let start = first_row * columns;
        let end = ((first_row + visible_rows) * columns).min(self.videos.len());

        for index in start..end {
            let card = VideoCard::new(&self.videos[index], index == self.state.selected);
            scroll_view.render_widget(card, self.state.card_rect(index));
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 3. Pull/refresh banner
        if let Some(banner) = self.pull_banner() {
            let banner_area = Rect::new(area.x, area.y, content_width, 1.min(area.height));
            let paragraph = Paragraph::new(Line::from(banner).centered()).style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_widget(paragraph, banner_area);
        }
    }
}
