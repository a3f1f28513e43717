use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{PlayerView, ShortsGrid, StatusView, TitleBar};
use crate::tui::playback::player_label;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(
        app.query.clone(),
        app.status_message.clone(),
        app.is_refreshing(),
    )
    .render(frame, title_area);

    // Main area - error, first load, empty page, or the grid
    if let Some(message) = app.error() {
        StatusView::Error { message }.render(frame, main_area);
    } else if app.videos.is_empty() && app.is_fetching() {
        StatusView::Loading { spinner_frame }.render(frame, main_area);
    } else if app.videos.is_empty() {
        StatusView::Empty { query: &app.query }.render(frame, main_area);
    } else {
        ShortsGrid::new(&mut tui.grid, &app.videos, app.is_refreshing()).render(frame, main_area);
    }

    frame.render_widget(help_line(app, tui), help_area);

    if let Some(player) = &tui.player {
        let label = player_label(app.player_command.as_deref());
        PlayerView::new(player, label).render(frame, frame.area());
    }
}

fn help_line(app: &App, tui: &TuiState) -> Line<'static> {
    let text = if tui.player.is_some() {
        " Enter play · Esc back"
    } else if app.error().is_some() {
        " r retry · q quit"
    } else {
        " ←↑↓→ move · Enter open · r / wheel-up at top refresh · q quit"
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
