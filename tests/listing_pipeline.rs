//! End-to-end tests of the fetch → render → cache pipeline against a mock API.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::time::Duration;

use pco_embed::cache::{cache_key, CacheStore, FileStore, MemoryStore};
use pco_embed::config::Config;
use pco_embed::planning_center::PlanningCenterClient;
use pco_embed::types::{ContentType, ListingRequest};
use pco_embed::ListingService;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn config_for(server: &MockServer) -> Config {
    Config::for_api(server.uri(), "app", "secret")
}

fn events_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "type": "Event",
                "id": "1",
                "attributes": {
                    "name": "Good Friday",
                    "html_url": "https://example.churchcenter.com/events/1",
                    "starts_at": "2024-03-29T19:00:00Z"
                }
            },
            {
                "type": "Event",
                "id": "2",
                "attributes": { "name": "Easter Brunch & Egg Hunt" }
            }
        ],
        "meta": { "total_count": 2 }
    })
}

#[tokio::test]
async fn renders_and_caches_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/v2/events"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let service = ListingService::from_config(
        PlanningCenterClient::new(&config),
        MemoryStore::new(),
        &config,
    );
    let request = ListingRequest::from_attrs(Some("events"), Some("2"));

    let first = service.render(&request).await;
    let second = service.render(&request).await;

    assert_eq!(
        first,
        concat!(
            r#"<ul class="pco-list pco-list-events">"#,
            r#"<li><a href="https://example.churchcenter.com/events/1">Good Friday</a>"#,
            r#" <span class="pco-date">(March 29, 2024)</span></li>"#,
            "<li>Easter Brunch &amp; Egg Hunt</li>",
            "</ul>"
        )
    );
    assert_eq!(first, second);
    assert_eq!(service.store().get(&cache_key("events", 2)), Some(first));
}

#[tokio::test]
async fn upstream_error_degrades_to_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/v2/groups"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let service = ListingService::from_config(
        PlanningCenterClient::new(&config),
        MemoryStore::new(),
        &config,
    );

    for _ in 0..2 {
        assert_eq!(
            service.render_type(ContentType::Groups, 5).await,
            "<p>Unable to load Planning Center data.</p>"
        );
    }
    assert!(service.store().is_empty());
}

#[tokio::test]
async fn payload_without_data_degrades_to_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sermons/v2/series"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": [{"title": "nope"}]})))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let service = ListingService::from_config(
        PlanningCenterClient::new(&config),
        MemoryStore::new(),
        &config,
    );

    assert_eq!(
        service.render_type(ContentType::Sermons, 5).await,
        "<p>Unable to load Planning Center data.</p>"
    );
}

#[tokio::test]
async fn missing_credentials_still_serve_cached_fragment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.pco_secret = String::new();
    let store = MemoryStore::new();
    store
        .set(&cache_key("groups", 5), "<p>from cache</p>", Duration::from_secs(60))
        .unwrap();
    let service = ListingService::from_config(PlanningCenterClient::new(&config), store, &config);

    assert_eq!(service.render_type(ContentType::Groups, 5).await, "<p>from cache</p>");
    assert_eq!(
        service.render_type(ContentType::Events, 5).await,
        "<p>Unable to load Planning Center data.</p>"
    );
}

#[tokio::test]
async fn file_cache_is_shared_between_services() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/v2/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"attributes": {"name": "Men's Breakfast"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server);
    let make_service = || {
        ListingService::from_config(
            PlanningCenterClient::new(&config),
            FileStore::new(dir.path()),
            &config,
        )
    };

    let first = make_service().render_type(ContentType::Groups, 5).await;
    let second = make_service().render_type(ContentType::Groups, 5).await;

    assert_eq!(first, r#"<ul class="pco-list pco-list-groups"><li>Men&#039;s Breakfast</li></ul>"#);
    assert_eq!(first, second);
}

#[tokio::test]
async fn render_all_hits_each_endpoint_once() {
    let server = MockServer::start().await;
    for p in ["/services/v2/events", "/sermons/v2/series", "/groups/v2/groups"] {
        Mock::given(method("GET"))
            .and(path(p))
            .and(query_param("per_page", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = config_for(&server);
    let service = ListingService::from_config(
        PlanningCenterClient::new(&config),
        MemoryStore::new(),
        &config,
    );

    let rendered = service.render_all(4).await;
    assert_eq!(rendered.len(), 3);
    assert!(rendered
        .iter()
        .all(|(_, html)| html == "<p>No Planning Center items found.</p>"));
}
