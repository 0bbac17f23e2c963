//! Contract tests for HttpFetcher against a resource origin.

use registrar_client::{ClientConfig, RegistrarClient};
use registrar_core::{FetchError, Fetcher};
use url::Url;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_client() -> RegistrarClient {
    RegistrarClient::new(ClientConfig {
        timeout_secs: 5,
        ..ClientConfig::default()
    })
    .unwrap()
}

fn uri(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{p}", server.uri())).unwrap()
}

#[tokio::test]
async fn fetch_returns_parsed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/abc123.json"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "Feature",
            "id": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let doc = test_client()
        .fetcher()
        .fetch(&uri(&server, "/items/abc123.json"))
        .await
        .unwrap();
    assert_eq!(doc["id"], "abc123");
}

#[tokio::test]
async fn fetch_non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client()
        .fetcher()
        .fetch(&uri(&server, "/missing.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_non_json_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetcher()
        .fetch(&uri(&server, "/page.html"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NotJson { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_rejects_non_http_schemes_without_network() {
    let err = test_client()
        .fetcher()
        .fetch(&Url::parse("ftp://example.org/item.json").unwrap())
        .await
        .unwrap_err();
    match err {
        FetchError::UnsupportedScheme { scheme, .. } => assert_eq!(scheme, "ftp"),
        other => panic!("expected UnsupportedScheme, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_unreachable_origin_is_transport_error() {
    let err = test_client()
        .fetcher()
        .fetch(&Url::parse("http://127.0.0.1:1/item.json").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_never_forwards_catalogue_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})))
        .mount(&server)
        .await;

    let client = RegistrarClient::new(ClientConfig {
        timeout_secs: 5,
        catalogue_token: Some(zeroize::Zeroizing::new("catalogue-token".into())),
        ..ClientConfig::default()
    })
    .unwrap();
    client
        .fetcher()
        .fetch(&uri(&server, "/item.json"))
        .await
        .unwrap();

    let received: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}
