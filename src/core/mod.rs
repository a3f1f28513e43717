//! # Core Application Logic
//!
//! This module contains shortfeed's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Config (resolution)  │
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    feed    │
//!           │  Adapter   │──spawns───►  │   loader   │
//!           │ (ratatui)  │              │  (reqwest) │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all feed state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file loading and override resolution

pub mod action;
pub mod config;
pub mod state;
