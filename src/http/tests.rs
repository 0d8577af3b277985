//! Tests for the HTTP client module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> HttpClient {
    let config = HttpClientConfig::builder()
        .user_agent("hubpager-test/1.0")
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("hubpager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::new(5, 2))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 2)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_http_client_config_from_client_config() {
    let mut client_config = ClientConfig::default();
    client_config.timeout_seconds = 7;
    client_config.requests_per_second = Some(3);
    client_config.user_agent = "agent/2".to_string();

    let config = HttpClientConfig::from(&client_config);
    assert_eq!(config.timeout, Duration::from_secs(7));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::per_second(3)));
    assert_eq!(config.user_agent, "agent/2");

    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());
}

#[tokio::test]
async fn test_get_page_sends_identity_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("accept", "application/json"))
        .and(header("user-agent", "hubpager-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "login": "octocat"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = test_client()
        .get_page(&format!("{}/user", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.body["login"], "octocat");
    assert!(page.links.is_empty());
    assert_eq!(page.item_count(), 1);
}

#[tokio::test]
async fn test_get_page_parses_link_header() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/user/repos?page=2", mock_server.uri());
    let last = format!("{}/user/repos?page=5", mock_server.uri());
    let link = format!(r#"<{next}>; rel="next", <{last}>; rel="last""#);

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": 1}, {"id": 2}]))
                .insert_header("link", link.as_str()),
        )
        .mount(&mock_server)
        .await;

    let page = test_client()
        .get_page(&format!("{}/user/repos", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(page.item_count(), 2);
    assert_eq!(page.links.len(), 2);
    assert_eq!(page.links.next(), Some(next.as_str()));
    assert_eq!(page.links.last(), Some(last.as_str()));
}

#[tokio::test]
async fn test_get_page_joins_repeated_link_headers() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/user/repos?page=2", mock_server.uri());
    let last = format!("{}/user/repos?page=5", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .append_header("link", format!(r#"<{last}>; rel="last""#).as_str())
                .append_header("link", format!(r#"<{next}>; rel="next""#).as_str()),
        )
        .mount(&mock_server)
        .await;

    let page = test_client()
        .get_page(&format!("{}/user/repos", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(page.links.len(), 2);
    assert_eq!(page.links.next(), Some(next.as_str()));
    assert_eq!(page.links.last(), Some(last.as_str()));
}

#[tokio::test]
async fn test_get_page_preserves_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get_page(&format!("{}/users/ghost", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"message":"Not Found"}"#);
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_page_rejects_non_200_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get_page(&format!("{}/user", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn test_get_page_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get_page(&format!("{}/user", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_get_page_malformed_link_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .insert_header("link", "https://example.com/page2; rel=\"next\""),
        )
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get_page(&format!("{}/user/orgs", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::LinkHeader { .. }));
}

#[tokio::test]
async fn test_get_page_transport_error() {
    // Nothing listens on port 1
    let err = test_client()
        .get_page("http://127.0.0.1:1/user")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}

#[test]
fn test_redact_strips_query() {
    assert_eq!(
        redact("https://api.github.com/user?access_token=secret&page=1"),
        "https://api.github.com/user"
    );
    assert_eq!(redact("https://api.github.com/user"), "https://api.github.com/user");
}
