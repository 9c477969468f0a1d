//! Integration tests for feed fetching against a local mock server

use newsforge_feed::{FeedFetcher, FeedOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RSS_BODY: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Mock Wire</title>
    <item>
      <title>First Story</title>
      <link>https://example.com/1</link>
      <description>Something happened</description>
      <category>Technology</category>
    </item>
    <item>
      <title>Second Story</title>
      <link>https://example.com/2</link>
      <description>Something else</description>
    </item>
  </channel>
</rss>"#;

fn fetcher() -> FeedFetcher {
    FeedFetcher::new(5, "NewsForge RSS Parser/1.0", 10).unwrap()
}

#[tokio::test]
async fn analyze_live_feed_returns_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(RSS_BODY, "application/rss+xml"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/feed.xml", server.uri());
    let outcome = fetcher().analyze(&url, None).await;

    assert_eq!(outcome.feed_status(), "live");
    match outcome {
        FeedOutcome::Success(report) => {
            assert_eq!(report.feed_title, "Mock Wire");
            assert_eq!(report.articles.len(), 2);
            assert_eq!(report.articles[0].categories, vec!["Technology"]);
        }
        FeedOutcome::Error { message } => panic!("expected success, got error: {message}"),
    }
}

#[tokio::test]
async fn analyze_respects_article_cap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(RSS_BODY, "application/rss+xml"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/feed.xml", server.uri());
    let outcome = fetcher().analyze(&url, Some(1)).await;

    match outcome {
        FeedOutcome::Success(report) => assert_eq!(report.articles.len(), 1),
        FeedOutcome::Error { message } => panic!("expected success, got error: {message}"),
    }
}

#[tokio::test]
async fn analyze_http_error_becomes_not_live() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/feed.xml", server.uri());
    let outcome = fetcher().analyze(&url, None).await;

    assert_eq!(outcome.feed_status(), "not_live");
    match outcome {
        FeedOutcome::Error { message } => assert!(message.contains("404"), "got: {message}"),
        FeedOutcome::Success(_) => panic!("expected error for HTTP 404"),
    }
}

#[tokio::test]
async fn analyze_invalid_xml_becomes_not_live() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not xml"))
        .mount(&server)
        .await;

    let url = format!("{}/feed.xml", server.uri());
    let outcome = fetcher().analyze(&url, None).await;

    assert_eq!(outcome.feed_status(), "not_live");
}

#[tokio::test]
async fn analyze_unreachable_server_becomes_not_live() {
    // Port 1 is never bound; connection refused immediately
    let outcome = fetcher().analyze("http://127.0.0.1:1/feed.xml", None).await;
    assert_eq!(outcome.feed_status(), "not_live");
}
