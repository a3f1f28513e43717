//! YouTube Data API v3 source.
//!
//! Two endpoints are used:
//! - `search` with `type=video&videoDuration=short` for the page of hits
//! - `videos` with `part=statistics,contentDetails` for per-item enrichment
//!
//! The API key travels as the `key` query parameter and is never logged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::feed::{FeedError, SearchHit, VideoDetails, VideoSource};

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

// ============================================================================
// YouTube Data API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize, Debug)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

/// Search results can be channels or playlists too; only `videoId` is useful.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Debug, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    fallback: Option<Thumbnail>,
}

#[derive(Deserialize, Debug)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    /// Largest available rendition: high, then medium, then default.
    fn best_url(self) -> String {
        self.high
            .or(self.medium)
            .or(self.fallback)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Debug)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    #[serde(default)]
    statistics: Statistics,
    content_details: Option<ContentDetails>,
}

/// The API encodes counters as decimal strings.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ContentDetails {
    duration: String,
}

/// Error envelope: `{"error": {"code": 403, "message": "..."}}`
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn to_search_hit(item: SearchItem) -> Option<SearchHit> {
    let video_id = item.id.video_id?;
    Some(SearchHit {
        video_id,
        title: item.snippet.title,
        channel_title: item.snippet.channel_title,
        thumbnail_url: item.snippet.thumbnails.best_url(),
        published_at: item.snippet.published_at,
    })
}

fn to_video_details(item: VideoItem) -> Option<VideoDetails> {
    let duration = item.content_details?.duration;
    let view_count = item
        .statistics
        .view_count
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    Some(VideoDetails {
        view_count,
        duration,
    })
}

/// Prefer the API's own error message over the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// ============================================================================
// Source Implementation
// ============================================================================

pub struct YouTubeSource {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl YouTubeSource {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_YOUTUBE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FeedError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.without_url().to_string()))?;

        debug!("YouTube /{} response status: {}", endpoint, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            let message = api_error_message(&err_body);
            warn!("YouTube API error on /{}: {} - {}", endpoint, status, message);
            return Err(FeedError::Api { status, message });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FeedError::Parse(e.without_url().to_string()))
    }
}

#[async_trait]
impl VideoSource for YouTubeSource {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn search_shorts(
        &self,
        query: &str,
        max_results: u8,
    ) -> Result<Vec<SearchHit>, FeedError> {
        let max_results = max_results.to_string();
        info!("YouTube search: q={:?}, maxResults={}", query, max_results);

        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("videoDuration", "short"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let total = response.items.len();
        let hits: Vec<SearchHit> = response.items.into_iter().filter_map(to_search_hit).collect();
        if hits.len() < total {
            debug!("Skipped {} non-video search results", total - hits.len());
        }
        Ok(hits)
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, FeedError> {
        let response: VideoListResponse = self
            .get_json(
                "videos",
                &[("part", "statistics,contentDetails"), ("id", video_id)],
            )
            .await?;

        Ok(response.items.into_iter().next().and_then(to_video_details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let source = YouTubeSource::new("k".to_string(), Some("http://localhost:9/v3/".to_string()));
        assert_eq!(source.base_url, "http://localhost:9/v3");
    }

    #[test]
    fn test_new_defaults_base_url() {
        let source = YouTubeSource::new("k".to_string(), None);
        assert_eq!(source.base_url, DEFAULT_YOUTUBE_BASE_URL);
    }

    #[test]
    fn test_search_item_without_video_id_is_skipped() {
        let json = r#"{"items": [
            {"id": {"kind": "youtube#channel", "channelId": "UC1"}, "snippet": {"title": "A channel"}},
            {"id": {"kind": "youtube#video", "videoId": "v1"},
             "snippet": {"title": "Clip", "channelTitle": "Chan",
                         "publishedAt": "2024-05-01T10:00:00Z",
                         "thumbnails": {"default": {"url": "d.jpg"}, "medium": {"url": "m.jpg"}}}}
        ]}"#;
        let response: SearchListResponse = serde_json::from_str(json).unwrap();
        let hits: Vec<SearchHit> = response.items.into_iter().filter_map(to_search_hit).collect();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].video_id, "v1");
        assert_eq!(hits[0].channel_title, "Chan");
        assert_eq!(hits[0].thumbnail_url, "m.jpg");
        assert!(hits[0].published_at.is_some());
    }

    #[test]
    fn test_video_details_hidden_views_default_to_zero() {
        let json = r#"{"items": [{"statistics": {}, "contentDetails": {"duration": "PT30S"}}]}"#;
        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        let details = response.items.into_iter().next().and_then(to_video_details).unwrap();
        assert_eq!(details.view_count, 0);
        assert_eq!(details.duration, "PT30S");
    }

    #[test]
    fn test_video_details_without_content_details_is_none() {
        let json = r#"{"items": [{"statistics": {"viewCount": "12"}}]}"#;
        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        assert!(response.items.into_iter().next().and_then(to_video_details).is_none());
    }

    #[test]
    fn test_api_error_message_prefers_envelope() {
        let body = r#"{"error": {"code": 403, "message": "quota exceeded"}}"#;
        assert_eq!(api_error_message(body), "quota exceeded");
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }
}
