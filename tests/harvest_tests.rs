//! Integration tests for the fetcher, traversal engine, and image synthesizer
//!
//! These tests use wiremock to stand in for IIIF endpoints and exercise the
//! full fetch-traverse-extract cycle end-to-end.

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loam_iiif::app::{
    manifest_images, traverse, CacheConfig, ClientConfig, IiifClient, ImageOptions,
};
use loam_iiif::errors::{AppError, FetchError};

/// Client with fast backoff and caching disabled
async fn test_client() -> IiifClient {
    let config = ClientConfig {
        backoff_factor: 0.01,
        ..Default::default()
    };
    let cache = CacheConfig {
        disabled: true,
        ..Default::default()
    };
    IiifClient::new(config, cache).await.unwrap()
}

fn manifest_ref(id: &str) -> serde_json::Value {
    json!({"id": id, "type": "Manifest"})
}

fn collection_ref(id: &str) -> serde_json::Value {
    json!({"id": id, "type": "Collection"})
}

async fn mount_collection(server: &MockServer, route: &str, items: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@context": "http://iiif.io/api/presentation/3/context.json",
            "id": format!("{}{}", server.uri(), route),
            "type": "Collection",
            "items": items,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_traverse_nested_collections() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_collection(
        &server,
        "/top",
        vec![
            manifest_ref(&format!("{base}/m/1")),
            collection_ref(&format!("{base}/child")),
        ],
    )
    .await;
    mount_collection(
        &server,
        "/child",
        vec![
            manifest_ref(&format!("{base}/m/2")),
            // Duplicate reference back to an already-seen manifest
            manifest_ref(&format!("{base}/m/1")),
        ],
    )
    .await;

    let client = test_client().await;
    let result = traverse(&client, &format!("{base}/top"), None)
        .await
        .unwrap();

    let mut manifests = result.manifests.clone();
    manifests.sort();
    assert_eq!(manifests, vec![format!("{base}/m/1"), format!("{base}/m/2")]);
    assert_eq!(result.collections.len(), 2);
    assert!(result.collections.contains(&format!("{base}/top")));
    assert!(result.collections.contains(&format!("{base}/child")));
}

#[tokio::test]
async fn test_traverse_legacy_v2_collection_shape() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@context": "http://iiif.io/api/presentation/2/context.json",
            "@id": format!("{base}/top"),
            "@type": "sc:Collection",
            "collections": [
                {"@id": format!("{base}/child"), "@type": "sc:Collection"},
            ],
            "manifests": [
                {"@id": format!("{base}/m/1"), "@type": "sc:Manifest"},
            ],
        })))
        .mount(&server)
        .await;
    mount_collection(&server, "/child", vec![manifest_ref(&format!("{base}/m/2"))]).await;

    let client = test_client().await;
    let result = traverse(&client, &format!("{base}/top"), None)
        .await
        .unwrap();

    assert_eq!(result.manifests.len(), 2);
    assert_eq!(result.collections.len(), 2);
}

#[tokio::test]
async fn test_traverse_continues_past_failed_child() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_collection(
        &server,
        "/top",
        vec![
            collection_ref(&format!("{base}/broken")),
            collection_ref(&format!("{base}/healthy")),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_collection(
        &server,
        "/healthy",
        vec![manifest_ref(&format!("{base}/m/1"))],
    )
    .await;

    let client = test_client().await;
    let result = traverse(&client, &format!("{base}/top"), None)
        .await
        .unwrap();

    // Sibling branch still discovered; failed collection never marked visited
    assert_eq!(result.manifests, vec![format!("{base}/m/1")]);
    assert!(!result.collections.contains(&format!("{base}/broken")));
}

#[tokio::test]
async fn test_shared_child_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_collection(
        &server,
        "/top",
        vec![
            collection_ref(&format!("{base}/a")),
            collection_ref(&format!("{base}/b")),
        ],
    )
    .await;
    mount_collection(&server, "/a", vec![collection_ref(&format!("{base}/shared"))]).await;
    mount_collection(&server, "/b", vec![collection_ref(&format!("{base}/shared"))]).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [manifest_ref(&format!("{base}/m/1"))],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client().await;
    let result = traverse(&client, &format!("{base}/top"), None)
        .await
        .unwrap();

    assert_eq!(result.manifests, vec![format!("{base}/m/1")]);
    assert_eq!(result.collections.len(), 4);
}

#[tokio::test]
async fn test_max_manifests_truncates_and_halts() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_collection(
        &server,
        "/top",
        vec![
            manifest_ref(&format!("{base}/m/1")),
            manifest_ref(&format!("{base}/m/2")),
            manifest_ref(&format!("{base}/m/3")),
            collection_ref(&format!("{base}/never")),
        ],
    )
    .await;

    // The nested collection must never be fetched once the limit is hit
    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client().await;
    let result = traverse(&client, &format!("{base}/top"), Some(2))
        .await
        .unwrap();

    assert_eq!(result.manifests.len(), 2);
}

#[tokio::test]
async fn test_root_fetch_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/top"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client().await;
    let result = traverse(&client, &format!("{}/top", server.uri()), None).await;

    match result {
        Err(AppError::Fetch(FetchError::Status { status, .. })) => assert_eq!(status, 404),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retry_on_503_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = test_client().await;
    let document = client
        .fetch_json(&format!("{}/doc", server.uri()))
        .await
        .unwrap();
    assert_eq!(document, json!({"ok": true}));
}

#[tokio::test]
async fn test_non_retryable_status_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client().await;
    let result = client.fetch_json(&format!("{}/doc", server.uri())).await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_trailing_commas_repaired_before_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"items": [{"id": "a",}, {"id": "b"},],}"#),
        )
        .mount(&server)
        .await;

    let client = test_client().await;
    let document = client
        .fetch_json(&format!("{}/doc", server.uri()))
        .await
        .unwrap();
    assert_eq!(document["items"][1]["id"], "b");
}

#[tokio::test]
async fn test_malformed_json_after_repair_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client().await;
    let result = client.fetch_json(&format!("{}/doc", server.uri())).await;
    assert!(matches!(result, Err(FetchError::MalformedJson { .. })));
}

#[tokio::test]
async fn test_disk_cache_short_circuits_second_fetch() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"v": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let cache = CacheConfig {
        cache_root: Some(cache_dir.path().to_path_buf()),
        ..Default::default()
    };
    let client = IiifClient::new(ClientConfig::default(), cache).await.unwrap();

    let url = format!("{}/doc", server.uri());
    let first = client.fetch_json(&url).await.unwrap();
    let second = client.fetch_json(&url).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_v3_manifest_image_extraction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/manifest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@context": "http://iiif.io/api/presentation/3/context.json",
            "items": [{
                "items": [{
                    "items": [{
                        "body": {"id": "https://ex.org/img/1"}
                    }]
                }]
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client().await;
    let options = ImageOptions {
        width: 100,
        height: 200,
        ..Default::default()
    };
    let urls = manifest_images(&client, &format!("{}/manifest", server.uri()), &options)
        .await
        .unwrap();

    assert_eq!(urls, vec!["https://ex.org/img/1/full/!100,200/0/default.jpg"]);
}

#[tokio::test]
async fn test_unrecognized_context_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/manifest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "@context": "http://iiif.io/api/search/1/context.json",
            "items": [],
        })))
        .mount(&server)
        .await;

    let client = test_client().await;
    let urls = manifest_images(
        &client,
        &format!("{}/manifest", server.uri()),
        &ImageOptions::default(),
    )
    .await
    .unwrap();

    assert!(urls.is_empty());
}
