use clap::Parser;
use shortfeed::core::config::{self, CliOverrides, ShortfeedConfig};
use shortfeed::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "shortfeed", about = "Browse short-form videos from the terminal")]
struct Args {
    /// Search query for the feed
    #[arg(short, long)]
    query: Option<String>,

    /// Number of search results to request (1-50)
    #[arg(long)]
    page_size: Option<u8>,

    /// Longest duration kept in the feed, in seconds
    #[arg(long = "max-duration")]
    max_duration: Option<u32>,

    /// Command that receives the watch URL (e.g. "mpv --loop")
    #[arg(long)]
    player: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to shortfeed.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("shortfeed.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        ShortfeedConfig::default()
    });

    let overrides = CliOverrides {
        query: args.query,
        page_size: args.page_size,
        max_duration_secs: args.max_duration,
        player_command: args.player,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "shortfeed starting up: query={:?}, page_size={}, max_duration={}s",
        resolved.query,
        resolved.page_size,
        resolved.max_duration_secs
    );

    let source = match tui::build_source(&resolved) {
        Ok(source) => source,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("shortfeed: {e}");
            std::process::exit(2);
        }
    };

    tui::run(resolved, source)
}
