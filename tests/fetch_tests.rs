//! Fetch boundary behavior against a local mock server.

use prospectfinder::config::HttpConfig;
use prospectfinder::fetch::{FetchError, HttpFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_config() -> HttpConfig {
    HttpConfig {
        user_agent: "prospectfinder-tests/0.1".to_string(),
        request_timeout_secs: 5,
        probe_timeout_secs: 2,
    }
}

#[tokio::test]
async fn test_fetch_returns_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>150 employees</p></body></html>"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    let page = fetcher.fetch(&server.uri()).await.unwrap();

    assert_eq!(page.status, 200);
    assert!(page.body.contains("150 employees"));
}

#[tokio::test]
async fn test_fetch_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    let result = fetcher.fetch(&server.uri()).await;

    match result {
        Err(FetchError::Http { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected Http error, got {:?}", other.map(|p| p.status)),
    }
}

#[tokio::test]
async fn test_probe_true_for_success_only() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/en"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    assert!(fetcher.probe(&format!("{}/en", server.uri())).await);
    assert!(!fetcher.probe(&format!("{}/missing", server.uri())).await);
}

#[tokio::test]
async fn test_fetch_unreachable_host_is_connect_error() {
    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    // reserved TLD guarantees resolution failure
    let result = fetcher.fetch("https://no-such-host.invalid/").await;
    assert!(matches!(
        result,
        Err(FetchError::Dns { .. }) | Err(FetchError::Transport { .. }) | Err(FetchError::Timeout { .. })
    ));
}
