//! Integration tests for the resolver
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, extract, and cache cycle end-to-end.

use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use thumbnail_resolver::cache::{CacheMapping, CacheStore, JsonCacheStore};
use thumbnail_resolver::config::Config;
use thumbnail_resolver::resolver::{Coordinator, HttpFetcher, PageFetcher, ResolveMode};
use thumbnail_resolver::{FetchError, RunSummary};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing its cache under `cache_dir`
fn create_test_config(cache_dir: &Path) -> Config {
    let mut config = Config::default();
    config.resolver.timeout_secs = 5;
    config.resolver.request_delay_ms = 0; // No pacing in tests
    config.resolver.max_redirects = 3;
    config.output.cache_path = cache_dir.join("data").join("thumbnails.json");
    config
}

fn og_page(image: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            r#"<html><head><title>Product</title>
            <meta property="og:image" content="{}">
            </head><body></body></html>"#,
            image
        ))
        .insert_header("content-type", "text/html")
}

async fn run(config: &Config, mode: ResolveMode, urls: &[String]) -> RunSummary {
    let mut coordinator =
        Coordinator::from_config(config, mode).expect("Failed to build resolver");
    coordinator.run(urls).await.expect("Run failed")
}

fn read_cache(config: &Config) -> CacheMapping {
    JsonCacheStore::new(&config.output.cache_path).load()
}

#[tokio::test]
async fn test_full_run_resolves_og_image() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/nl/werk/a"))
        .respond_with(og_page("/img/a.jpg"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nl/werk/b"))
        .respond_with(og_page("https://cdn.example.com/b.jpg"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let urls = vec![
        format!("{}/nl/werk/a", base_url),
        format!("{}/nl/werk/b", base_url),
    ];

    let summary = run(&config, ResolveMode::Incremental, &urls).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.newly_resolved, 2);
    assert!(summary.is_complete());

    // Parent directory is created on persist
    assert!(config.output.cache_path.exists());

    let mapping = read_cache(&config);
    assert_eq!(mapping[&urls[0]], format!("{}/img/a.jpg", base_url));
    assert_eq!(mapping[&urls[1]], "https://cdn.example.com/b.jpg");
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_test_config(temp_dir.path());
    config.user_agent.user_agent = "TestBrowser/1.0".to_string();

    Mock::given(method("GET"))
        .and(path("/product"))
        .and(header("user-agent", "TestBrowser/1.0"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(og_page("/p.jpg"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let urls = vec![format!("{}/product", mock_server.uri())];
    let summary = run(&config, ResolveMode::Incremental, &urls).await;

    assert_eq!(summary.newly_resolved, 1);
}

#[tokio::test]
async fn test_incremental_run_makes_no_requests_for_cached_urls() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let url = format!("{}/cached", mock_server.uri());

    Mock::given(method("GET"))
        .respond_with(og_page("/new.jpg"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut seeded = CacheMapping::new();
    seeded.insert(url.clone(), "https://cdn.example.com/old.jpg".to_string());
    JsonCacheStore::new(&config.output.cache_path)
        .persist(&seeded)
        .unwrap();
    let before = std::fs::read(&config.output.cache_path).unwrap();

    let summary = run(&config, ResolveMode::Incremental, &[url]).await;

    assert_eq!(summary.cached, 1);
    assert_eq!(summary.fetched(), 0);
    assert_eq!(std::fs::read(&config.output.cache_path).unwrap(), before);
}

#[tokio::test]
async fn test_refresh_run_overwrites_cached_entries() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let url = format!("{}/product", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/product"))
        .respond_with(og_page("https://cdn.example.com/new.jpg"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut seeded = CacheMapping::new();
    seeded.insert(url.clone(), "https://cdn.example.com/old.jpg".to_string());
    JsonCacheStore::new(&config.output.cache_path)
        .persist(&seeded)
        .unwrap();

    let summary = run(&config, ResolveMode::Refresh, &[url.clone()]).await;

    assert_eq!(summary.newly_resolved, 1);
    assert_eq!(read_cache(&config)[&url], "https://cdn.example.com/new.jpg");
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(og_page("img/moved.jpg"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let url = format!("{}/old", base_url);

    let summary = run(&config, ResolveMode::Incremental, &[url.clone()]).await;

    assert_eq!(summary.newly_resolved, 1);
    // Keyed by the catalog URL, not the final location
    assert_eq!(read_cache(&config)[&url], format!("{}/img/moved.jpg", base_url));
}

#[tokio::test]
async fn test_redirect_loop_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/b"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/a"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let fetcher = HttpFetcher::new(&config).unwrap();

    let result = fetcher.fetch(&format!("{}/a", mock_server.uri())).await;

    assert!(matches!(result, Err(FetchError::RedirectLoop { .. })));
}

#[tokio::test]
async fn test_redirect_limit_is_an_error() {
    let mock_server = MockServer::start().await;

    for hop in 0..6 {
        Mock::given(method("GET"))
            .and(path(format!("/r{}", hop)))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", format!("/r{}", hop + 1).as_str()),
            )
            .mount(&mock_server)
            .await;
    }

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let url = format!("{}/r0", mock_server.uri());

    let fetcher = HttpFetcher::new(&config).unwrap();
    let result = fetcher.fetch(&url).await;
    assert!(matches!(result, Err(FetchError::RedirectLimit { hops: 3, .. })));

    let summary = run(&config, ResolveMode::Incremental, &[url]).await;
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.cache_size, 0);
}

#[tokio::test]
async fn test_redirect_without_location_is_a_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(302))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let url = format!("{}/moved", mock_server.uri());

    let summary = run(&config, ResolveMode::Incremental, &[url.clone()]).await;

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].url, url);
    assert_eq!(summary.errors[0].reason, "HTTP 302");
    assert_eq!(summary.cache_size, 0);
}

#[tokio::test]
async fn test_connection_refused_is_recorded() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/product", port);

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());

    let fetcher = HttpFetcher::new(&config).unwrap();
    let result = fetcher.fetch(&url).await;
    assert!(matches!(result, Err(FetchError::Connection { .. })));

    let summary = run(&config, ResolveMode::Incremental, &[url.clone()]).await;

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].url, url);
    assert!(summary.errors[0].reason.starts_with("Connection error"));
    assert!(config.output.cache_path.exists());
}

#[tokio::test]
async fn test_http_error_status_is_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(og_page("/ok.jpg"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let urls = vec![format!("{}/gone", base_url), format!("{}/ok", base_url)];

    let summary = run(&config, ResolveMode::Incremental, &urls).await;

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].url, urls[0]);
    assert_eq!(summary.errors[0].reason, "HTTP 404");
    assert_eq!(summary.newly_resolved, 1);

    let mapping = read_cache(&config);
    assert!(!mapping.contains_key(&urls[0]));
    assert!(mapping.contains_key(&urls[1]));
}

#[tokio::test]
async fn test_timeout_leaves_cache_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(og_page("/slow.jpg").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut config = create_test_config(temp_dir.path());
    config.resolver.timeout_secs = 1;

    let url = format!("{}/slow", mock_server.uri());
    let summary = run(&config, ResolveMode::Incremental, &[url]).await;

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].reason, "Timeout");
    assert_eq!(summary.cache_size, 0);

    // The cache is still written once
    let content = std::fs::read_to_string(&config.output.cache_path).unwrap();
    assert_eq!(content, "{}");
}

#[tokio::test]
async fn test_page_without_image_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(
                r#"<html><body><img src="/logo.png" width="900" height="900"></body></html>"#,
            ),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(temp_dir.path());
    let url = format!("{}/empty", mock_server.uri());

    let summary = run(&config, ResolveMode::Incremental, &[url.clone()]).await;

    assert_eq!(summary.not_found, vec![url]);
    assert!(summary.errors.is_empty());
}
