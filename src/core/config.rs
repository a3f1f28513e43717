//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shortfeed/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::feed::youtube::DEFAULT_YOUTUBE_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShortfeedConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    pub query: Option<String>,
    pub page_size: Option<u8>,
    pub max_duration_secs: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct YouTubeConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    pub command: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_QUERY: &str = "shorts";
pub const DEFAULT_PAGE_SIZE: u8 = 20;
/// The search endpoint rejects `maxResults` above 50.
pub const MAX_PAGE_SIZE: u8 = 50;
pub const DEFAULT_MAX_DURATION_SECS: u32 = 60;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub query: String,
    pub page_size: u8,
    pub max_duration_secs: u32,
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: String,
    pub player_command: Option<String>,
}

/// Values supplied on the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub query: Option<String>,
    pub page_size: Option<u8>,
    pub max_duration_secs: Option<u32>,
    pub player_command: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.shortfeed/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shortfeed").join("config.toml"))
}

/// Load config from `~/.shortfeed/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShortfeedConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShortfeedConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShortfeedConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ShortfeedConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ShortfeedConfig, ConfigError> {
    let config: ShortfeedConfig = toml::from_str(contents).map_err(ConfigError::Parse)?;
    // The key is redacted so it never lands in shortfeed.log
    debug!(
        "Config: feed={:?}, youtube.base_url={:?}, youtube.api_key set={}, player={:?}",
        config.feed,
        config.youtube.base_url,
        config.youtube.api_key.is_some(),
        config.player
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# shortfeed configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [feed]
# query = "shorts"                   # Or set SHORTFEED_QUERY / --query
# page_size = 20                     # 1-50 results per fetch
# max_duration_secs = 60             # Longer videos are dropped

# [youtube]
# api_key = "AIza..."                # Or set YOUTUBE_API_KEY env var
# base_url = "https://www.googleapis.com/youtube/v3"

# [player]
# command = "mpv"                    # Receives the watch URL; empty = system opener
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ShortfeedConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Query: CLI → env → config → default
    let query = cli
        .query
        .clone()
        .or_else(|| std::env::var("SHORTFEED_QUERY").ok())
        .or_else(|| config.feed.query.clone())
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_QUERY.to_string());

    let page_size = cli
        .page_size
        .or(config.feed.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let max_duration_secs = cli
        .max_duration_secs
        .or(config.feed.max_duration_secs)
        .unwrap_or(DEFAULT_MAX_DURATION_SECS);

    // API key: env → config
    let youtube_api_key = std::env::var("YOUTUBE_API_KEY")
        .ok()
        .or_else(|| config.youtube.api_key.clone())
        .filter(|k| !k.is_empty());

    // Base URL: env → config → default
    let youtube_base_url = std::env::var("YOUTUBE_BASE_URL")
        .ok()
        .or_else(|| config.youtube.base_url.clone())
        .unwrap_or_else(|| DEFAULT_YOUTUBE_BASE_URL.to_string());

    // Player: CLI → env → config; empty string means "use the system opener"
    let player_command = cli
        .player_command
        .clone()
        .or_else(|| std::env::var("SHORTFEED_PLAYER").ok())
        .or_else(|| config.player.command.clone())
        .filter(|c| !c.trim().is_empty());

    ResolvedConfig {
        query,
        page_size,
        max_duration_secs,
        youtube_api_key,
        youtube_base_url,
        player_command,
    }
}
