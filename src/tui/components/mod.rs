//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing the query and status
//! - `VideoCard`: One short rendered as a bordered card
//! - `StatusView`: Loading / error / empty placeholders
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep persistent state in `TuiState` and emit events:
//! - `ShortsGrid`: Scrollable card grid with selection and pull-to-refresh
//! - `PlayerView`: Overlay for a single video with playback hand-off
//!
//! Each component file contains its state types, event types, rendering,
//! event handling and tests.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (Top status bar)
//! ├── video_card.rs   (Single card renderer)
//! ├── shorts_grid.rs  (Scrollable card container)
//! ├── status_view.rs  (Loading / error / empty)
//! └── player.rs       (Player overlay)
//! ```

pub mod player;
pub mod shorts_grid;
pub mod status_view;
mod title_bar;
pub mod video_card;

pub use player::{PlayerEvent, PlayerState, PlayerView};
pub use shorts_grid::{GridEvent, ShortsGrid, ShortsGridState};
pub use status_view::StatusView;
pub use title_bar::TitleBar;
pub use video_card::VideoCard;
