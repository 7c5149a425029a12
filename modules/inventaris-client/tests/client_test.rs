//! Inventory client against a local mock server.

use chrono::Duration;
use erfgoed_common::config::InventarisConfig;
use erfgoed_common::{DiskCache, ErfgoedError, InventorySource, QueryFilter};
use inventaris_client::{InventarisClient, InventarisError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, cache_dir: &std::path::Path, max_attempts: u32) -> InventarisClient {
    let config = InventarisConfig {
        base_url: server.uri(),
        id_host: "id.erfgoed.net".to_string(),
        timeout_secs: 5,
        max_attempts,
    };
    let cache = DiskCache::open(cache_dir, Duration::hours(1)).unwrap();
    InventarisClient::new(&config, cache).unwrap()
}

fn summary(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "uri": format!("https://id.erfgoed.net/erfgoedobjecten/{id}"),
        "self": format!("https://inventaris.onroerenderfgoed.be/erfgoedobjecten/{id}"),
        "naam": format!("Object {id}"),
        "disciplines": [{"id": 2, "naam": "Bouwkundig"}]
    })
}

#[tokio::test]
async fn listing_follows_next_links() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten"))
        .and(query_param("pagina", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary(3)])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten"))
        .and(query_param("typologie", "53"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Range", "items 0-1/3")
                .insert_header(
                    "Link",
                    format!("<{}/erfgoedobjecten?pagina=2>; rel=\"next\"", server.uri()).as_str(),
                )
                .set_body_json(json!([summary(1), summary(2)])),
        )
        .mount(&server)
        .await;

    let filter = QueryFilter {
        concept: Some(53),
        ..QueryFilter::default()
    };
    let records = client(&server, dir.path(), 5)
        .erfgoedobjecten(&filter)
        .await
        .unwrap();

    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(
        records[0].self_link,
        format!("{}/erfgoedobjecten/1", server.uri()),
        "self link is rebuilt against the inventory host"
    );
}

#[tokio::test]
async fn listing_without_content_range_is_empty() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary(1)])))
        .mount(&server)
        .await;

    let records = client(&server, dir.path(), 5)
        .erfgoedobjecten(&QueryFilter::default())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn listing_failure_is_fatal_through_the_trait() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server, dir.path(), 5)
        .fetch_list(&QueryFilter::default())
        .await
        .unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn missing_detail_is_none_and_cached() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("niet gevonden"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, dir.path(), 5);
    let url = format!("{}/erfgoedobjecten/9", server.uri());
    assert!(client.erfgoedobject(&url).await.unwrap().is_none());
    assert!(client.erfgoedobject(&url).await.unwrap().is_none());
}

#[tokio::test]
async fn detail_is_retried_after_server_errors() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten/1"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "erfgoedwaarde": true,
            "relaties": [],
            "kenmerkgroepen": []
        })))
        .mount(&server)
        .await;

    let url = format!("{}/erfgoedobjecten/1", server.uri());
    let detail = client(&server, dir.path(), 5)
        .erfgoedobject(&url)
        .await
        .unwrap()
        .expect("detail record");
    assert_eq!(detail.erfgoedwaarde, Some(true));
}

#[tokio::test]
async fn exhausted_retries_are_fatal() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&server)
        .await;

    let client = client(&server, dir.path(), 3);
    let url = format!("{}/erfgoedobjecten/1", server.uri());

    let err = client.erfgoedobject(&url).await.unwrap_err();
    assert!(matches!(err, InventarisError::RetriesExhausted { attempts: 3, .. }));

    // Failures are not cached, so the trait call retries from scratch.
    let err = client.fetch_detail(&url).await.unwrap_err();
    assert!(matches!(err, ErfgoedError::Fetch { fatal: true, .. }));
}

#[tokio::test]
async fn unparseable_detail_only_loses_that_record() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/erfgoedobjecten/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let url = format!("{}/erfgoedobjecten/1", server.uri());
    let err = client(&server, dir.path(), 5)
        .fetch_detail(&url)
        .await
        .unwrap_err();
    assert!(!err.is_fatal());
}
