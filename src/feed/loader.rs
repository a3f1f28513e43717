//! # Shorts Feed Loader
//!
//! One page of the feed is built in three steps:
//!
//! ```text
//! search_shorts ──► [hit, hit, ... hit]        (failure aborts the load)
//!                      │    │        │
//!                      ▼    ▼        ▼
//!               video_details (all in flight at once, joined)
//!                      │    │        │
//!                      ▼    ▼        ▼
//!               drop failures, drop duration > threshold
//!                      │
//!                      ▼
//!               Vec<ShortVideo> in search order
//! ```
//!
//! Enrichment failures never surface to the caller. The item is logged and
//! left out, and the rest of the batch is unaffected.

use futures::future::join_all;
use log::{debug, info, warn};

use crate::feed::format::{decode_html_entities, format_view_count, parse_duration};
use crate::feed::{FeedError, FeedRequest, SearchHit, ShortVideo, VideoDetails, VideoSource};

/// Fetches, enriches and filters one page of shorts.
pub async fn load_feed(
    source: &dyn VideoSource,
    request: FeedRequest<'_>,
) -> Result<Vec<ShortVideo>, FeedError> {
    let mut hits = source
        .search_shorts(request.query, request.page_size)
        .await?;
    hits.truncate(request.page_size as usize);

    info!(
        "{}: {} search hits for {:?}, enriching",
        source.name(),
        hits.len(),
        request.query
    );

    let lookups = hits.iter().map(|hit| source.video_details(&hit.video_id));
    let details = join_all(lookups).await;

    let videos: Vec<ShortVideo> = hits
        .into_iter()
        .zip(details)
        .filter_map(|(hit, result)| match result {
            Ok(Some(details)) => Some((hit, details)),
            Ok(None) => {
                debug!("No details for video {}, skipping", hit.video_id);
                None
            }
            Err(e) => {
                warn!("Details lookup failed for video {}: {}", hit.video_id, e);
                None
            }
        })
        .filter_map(|(hit, details)| build_short(hit, details, request.max_duration_secs))
        .collect();

    info!("{}: {} shorts after filtering", source.name(), videos.len());
    Ok(videos)
}

/// Combines a hit with its details, or `None` if it runs past the threshold.
fn build_short(hit: SearchHit, details: VideoDetails, max_duration_secs: u32) -> Option<ShortVideo> {
    let duration_secs = parse_duration(&details.duration);
    if duration_secs > max_duration_secs {
        debug!(
            "Video {} is {}s (> {}s), skipping",
            hit.video_id, duration_secs, max_duration_secs
        );
        return None;
    }

    Some(ShortVideo {
        id: hit.video_id,
        title: decode_html_entities(&hit.title),
        thumbnail_url: hit.thumbnail_url,
        views: format_view_count(details.view_count),
        channel: decode_html_entities(&hit.channel_title),
        view_count: details.view_count,
        duration_secs,
        published_at: hit.published_at,
    })
}
