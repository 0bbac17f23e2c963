//! Contract tests for RecordsClient against an OGC API Records catalogue.
//!
//! These tests use wiremock to simulate the catalogue's item endpoints.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/collections/metadata:main/items/{id}` | `lookup_*` |
//! | POST   | `/collections/metadata:main/items` | `create_*` |
//! | PUT    | `/collections/metadata:main/items/{id}` | `update_*` |
//! | DELETE | `/collections/metadata:main/items/{id}` | `delete_*` |
//! | GET, DELETE | `/collections/metadata:main/items/a%2Fb` | `slash_in_id_*` |

use registrar_client::{ClientConfig, RegistrarClient};
use registrar_core::{
    Catalogue, CatalogueEndpoint, CatalogueError, ItemId, Lookup, ResourceDocument,
    METADATA_COLLECTION,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEM_PATH: &str = "/collections/metadata:main/items/abc123";
const ITEMS_PATH: &str = "/collections/metadata:main/items";

fn test_client() -> RegistrarClient {
    let config = ClientConfig {
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    RegistrarClient::new(config).unwrap()
}

fn endpoint(server: &MockServer) -> CatalogueEndpoint {
    CatalogueEndpoint::parse(&server.uri()).unwrap()
}

fn item_id() -> ItemId {
    ItemId::new("abc123").unwrap()
}

fn document() -> ResourceDocument {
    ResourceDocument::from_value(serde_json::json!({
        "type": "Feature",
        "id": "abc123",
        "properties": {"title": "Simple item"},
        "links": []
    }))
    .unwrap()
}

// ── GET /collections/{collection}/items/{id} ─────────────────────────

#[tokio::test]
async fn lookup_returns_found_with_stored_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc123",
            "type": "Feature"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = test_client()
        .records()
        .lookup(&endpoint(&server), METADATA_COLLECTION, &item_id())
        .await
        .unwrap();

    match lookup {
        Lookup::Found(item) => assert_eq!(item["id"], "abc123"),
        Lookup::Absent => panic!("expected Found"),
    }
}

#[tokio::test]
async fn lookup_returns_absent_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let lookup = test_client()
        .records()
        .lookup(&endpoint(&server), METADATA_COLLECTION, &item_id())
        .await
        .unwrap();
    assert_eq!(lookup, Lookup::Absent);
}

#[tokio::test]
async fn lookup_server_error_is_not_absence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = test_client()
        .records()
        .lookup(&endpoint(&server), METADATA_COLLECTION, &item_id())
        .await;
    match result {
        Err(CatalogueError::Status { status, body, .. }) => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal Server Error"));
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn lookup_unreachable_catalogue_is_transport_error() {
    let unreachable = CatalogueEndpoint::parse("http://127.0.0.1:1").unwrap();
    let result = test_client()
        .records()
        .lookup(&unreachable, METADATA_COLLECTION, &item_id())
        .await;
    assert!(
        matches!(result, Err(CatalogueError::Transport { .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn lookup_non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let result = test_client()
        .records()
        .lookup(&endpoint(&server), METADATA_COLLECTION, &item_id())
        .await;
    assert!(matches!(result, Err(CatalogueError::Decode { .. })), "got: {result:?}");
}

// ── POST /collections/{collection}/items ─────────────────────────────

#[tokio::test]
async fn create_posts_full_document_as_geojson() {
    let server = MockServer::start().await;
    let doc = document();
    Mock::given(method("POST"))
        .and(path(ITEMS_PATH))
        .and(header("content-type", "application/geo+json"))
        .and(body_json(doc.body()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    test_client()
        .records()
        .create(&endpoint(&server), METADATA_COLLECTION, &doc)
        .await
        .unwrap();
}

#[tokio::test]
async fn create_conflict_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ITEMS_PATH))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let result = test_client()
        .records()
        .create(&endpoint(&server), METADATA_COLLECTION, &document())
        .await;
    match result {
        Err(CatalogueError::Conflict { id, collection }) => {
            assert_eq!(id, "abc123");
            assert_eq!(collection, METADATA_COLLECTION);
        }
        other => panic!("expected Conflict, got: {other:?}"),
    }
}

#[tokio::test]
async fn create_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ITEMS_PATH))
        .and(header("authorization", "Bearer catalogue-token"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = RegistrarClient::new(ClientConfig {
        timeout_secs: 5,
        catalogue_token: Some(zeroize::Zeroizing::new("catalogue-token".into())),
        ..ClientConfig::default()
    })
    .unwrap();

    client
        .records()
        .create(&endpoint(&server), METADATA_COLLECTION, &document())
        .await
        .unwrap();
}

// ── PUT /collections/{collection}/items/{id} ─────────────────────────

#[tokio::test]
async fn update_puts_full_document() {
    let server = MockServer::start().await;
    let doc = document();
    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(body_json(doc.body()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client()
        .records()
        .update(&endpoint(&server), METADATA_COLLECTION, &item_id(), &doc)
        .await
        .unwrap();
}

#[tokio::test]
async fn update_missing_item_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client()
        .records()
        .update(&endpoint(&server), METADATA_COLLECTION, &item_id(), &document())
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got: {err:?}");
}

// ── DELETE /collections/{collection}/items/{id} ──────────────────────

#[tokio::test]
async fn delete_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    test_client()
        .records()
        .delete(&endpoint(&server), METADATA_COLLECTION, &item_id())
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_distinguishes_not_found_from_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/collections/metadata:main/items/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = test_client();
    let missing = client
        .records()
        .delete(&endpoint(&server), METADATA_COLLECTION, &item_id())
        .await
        .unwrap_err();
    assert!(missing.is_not_found());

    let broken = client
        .records()
        .delete(
            &endpoint(&server),
            METADATA_COLLECTION,
            &ItemId::new("broken").unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(broken, CatalogueError::Status { status: 503, .. }), "got: {broken:?}");
}

#[tokio::test]
async fn endpoint_base_path_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalogue/collections/metadata:main/items/abc123"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let nested = CatalogueEndpoint::parse(&format!("{}/catalogue/", server.uri())).unwrap();
    let lookup = test_client()
        .records()
        .lookup(&nested, METADATA_COLLECTION, &item_id())
        .await
        .unwrap();
    assert_eq!(lookup, Lookup::Absent);
}

// ── Identifiers that are not plain path segments ─────────────────────

#[tokio::test]
async fn slash_in_id_stays_inside_the_item_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/metadata:main/items/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "a/b"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/collections/metadata:main/items/a%2Fb"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path(ITEMS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(path("/collections/metadata:main/items/a/b"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let id = ItemId::new("a/b").unwrap();
    let client = test_client();
    let lookup = client
        .records()
        .lookup(&endpoint(&server), METADATA_COLLECTION, &id)
        .await
        .unwrap();
    assert!(matches!(lookup, Lookup::Found(_)));
    client
        .records()
        .delete(&endpoint(&server), METADATA_COLLECTION, &id)
        .await
        .unwrap();
}

#[test]
fn dot_segment_ids_never_reach_the_client() {
    for reserved in [".", ".."] {
        assert!(ItemId::new(reserved).is_err(), "{reserved}");
    }
}
