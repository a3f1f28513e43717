use serde_json::json;
use shortfeed::feed::{FeedError, FeedRequest, VideoSource, YouTubeSource, load_feed};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn search_item(id: &str, title: &str) -> serde_json::Value {
    json!({
        "kind": "youtube#searchResult",
        "id": { "kind": "youtube#video", "videoId": id },
        "snippet": {
            "title": title,
            "channelTitle": "Clip Channel",
            "publishedAt": "2026-01-15T12:00:00Z",
            "thumbnails": {
                "default": { "url": format!("https://i.ytimg.test/{id}/default.jpg") },
                "high": { "url": format!("https://i.ytimg.test/{id}/hq.jpg") }
            }
        }
    })
}

fn video_item(id: &str, views: &str, duration: &str) -> serde_json::Value {
    json!({
        "items": [{
            "id": id,
            "statistics": { "viewCount": views },
            "contentDetails": { "duration": duration }
        }]
    })
}

async fn mount_search(server: &MockServer, items: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

async fn mount_details(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", id))
        .respond_with(response)
        .mount(server)
        .await;
}

fn source(server: &MockServer) -> YouTubeSource {
    YouTubeSource::new("test-key".to_string(), Some(server.uri()))
}

fn request(query: &str) -> FeedRequest<'_> {
    FeedRequest {
        query,
        page_size: 20,
        max_duration_secs: 60,
    }
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_sends_short_video_filters_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("part", "snippet"))
        .and(query_param("type", "video"))
        .and(query_param("videoDuration", "short"))
        .and(query_param("q", "cat videos"))
        .and(query_param("maxResults", "5"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [search_item("abc", "Cat &amp; Dog")] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let hits = source(&mock_server)
        .search_shorts("cat videos", 5)
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].video_id, "abc");
    assert_eq!(hits[0].channel_title, "Clip Channel");
    assert_eq!(hits[0].thumbnail_url, "https://i.ytimg.test/abc/hq.jpg");
    assert!(hits[0].published_at.is_some());
}

#[tokio::test]
async fn test_search_skips_non_video_results() {
    let mock_server = MockServer::start().await;
    mount_search(
        &mock_server,
        vec![
            search_item("abc", "A video"),
            json!({
                "id": { "kind": "youtube#channel", "channelId": "UC123" },
                "snippet": { "title": "A channel" }
            }),
        ],
    )
    .await;

    let hits = source(&mock_server).search_shorts("q", 20).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].video_id, "abc");
}

#[tokio::test]
async fn test_search_api_error_uses_envelope_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "The request cannot be completed because you have exceeded your quota." }
        })))
        .mount(&mock_server)
        .await;

    let result = source(&mock_server).search_shorts("q", 20).await;

    match result {
        Err(FeedError::Api { status, message }) => {
            assert_eq!(status, 403);
            assert!(message.contains("exceeded your quota"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = source(&mock_server).search_shorts("q", 20).await;
    assert!(matches!(result, Err(FeedError::Parse(_))));
}

/// A base URL nothing is listening on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let source = YouTubeSource::new("test-key".to_string(), Some(closed_port_url()));
    let result = source.search_shorts("q", 20).await;

    assert!(matches!(result, Err(FeedError::Network(_))));
}

#[tokio::test]
async fn test_network_error_does_not_expose_api_key() {
    let source = YouTubeSource::new("secret-key-123".to_string(), Some(closed_port_url()));

    let search = source.search_shorts("q", 20).await.unwrap_err();
    let details = source.video_details("abc").await.unwrap_err();

    for err in [search, details] {
        assert!(matches!(err, FeedError::Network(_)));
        assert!(!err.to_string().contains("secret-key-123"), "{err}");
    }
}

#[tokio::test]
async fn test_parse_error_does_not_expose_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let source = YouTubeSource::new("secret-key-123".to_string(), Some(mock_server.uri()));
    let err = source.search_shorts("q", 20).await.unwrap_err();

    assert!(matches!(err, FeedError::Parse(_)));
    assert!(!err.to_string().contains("secret-key-123"), "{err}");
}

// ============================================================================
// Details
// ============================================================================

#[tokio::test]
async fn test_video_details_requests_statistics_and_content_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "statistics,contentDetails"))
        .and(query_param("id", "abc"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(video_item("abc", "1234", "PT45S")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let details = source(&mock_server)
        .video_details("abc")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.view_count, 1234);
    assert_eq!(details.duration, "PT45S");
}

#[tokio::test]
async fn test_video_details_unknown_id_is_none() {
    let mock_server = MockServer::start().await;
    mount_details(
        &mock_server,
        "gone",
        ResponseTemplate::new(200).set_body_json(json!({ "items": [] })),
    )
    .await;

    let details = source(&mock_server).video_details("gone").await.unwrap();
    assert!(details.is_none());
}

// ============================================================================
// Full Feed Load
// ============================================================================

#[tokio::test]
async fn test_load_feed_filters_long_videos_and_formats() {
    let mock_server = MockServer::start().await;
    mount_search(
        &mock_server,
        vec![
            search_item("short1", "Quick &amp; fun"),
            search_item("long1", "Too long"),
            search_item("short2", "Exactly a minute"),
        ],
    )
    .await;
    mount_details(
        &mock_server,
        "short1",
        ResponseTemplate::new(200).set_body_json(video_item("short1", "1500", "PT45S")),
    )
    .await;
    mount_details(
        &mock_server,
        "long1",
        ResponseTemplate::new(200).set_body_json(video_item("long1", "9000000", "PT1M30S")),
    )
    .await;
    mount_details(
        &mock_server,
        "short2",
        ResponseTemplate::new(200).set_body_json(video_item("short2", "2500000", "PT1M")),
    )
    .await;

    let videos = load_feed(&source(&mock_server), request("fun"))
        .await
        .unwrap();

    let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["short1", "short2"]);

    assert_eq!(videos[0].title, "Quick & fun");
    assert_eq!(videos[0].views, "1.5K");
    assert_eq!(videos[0].duration_secs, 45);
    assert_eq!(videos[1].views, "2.5M");
    assert_eq!(videos[1].duration_secs, 60);
}

#[tokio::test]
async fn test_load_feed_skips_failed_and_missing_details() {
    let mock_server = MockServer::start().await;
    mount_search(
        &mock_server,
        vec![
            search_item("ok", "Fine"),
            search_item("broken", "Server error"),
            search_item("missing", "Deleted"),
        ],
    )
    .await;
    mount_details(
        &mock_server,
        "ok",
        ResponseTemplate::new(200).set_body_json(video_item("ok", "10", "PT10S")),
    )
    .await;
    mount_details(&mock_server, "broken", ResponseTemplate::new(500)).await;
    mount_details(
        &mock_server,
        "missing",
        ResponseTemplate::new(200).set_body_json(json!({ "items": [] })),
    )
    .await;

    let videos = load_feed(&source(&mock_server), request("q"))
        .await
        .unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].id, "ok");
    assert_eq!(videos[0].views, "10");
}

#[tokio::test]
async fn test_load_feed_search_failure_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&mock_server)
        .await;

    let result = load_feed(&source(&mock_server), request("q")).await;

    match result {
        Err(FeedError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "backend error");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_feed_empty_search_is_empty_page() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, Vec::new()).await;

    let videos = load_feed(&source(&mock_server), request("nothing"))
        .await
        .unwrap();

    assert!(videos.is_empty());
}
