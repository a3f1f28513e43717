//! shortfeed library exports for testing

pub mod core;
pub mod feed;
pub mod tui;

#[cfg(test)]
pub mod test_support;
