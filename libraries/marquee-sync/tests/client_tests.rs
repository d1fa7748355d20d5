//! Integration tests for the HTTP sync client
//!
//! Uses wiremock to stand in for the integration service.

use marquee_core::types::IntegrationId;
use marquee_core::IntegrationService;
use marquee_sync::HttpIntegrationService;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn trigger_sync_posts_and_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/integrations/weather-1/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sync_result": {"temp": 18}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpIntegrationService::new(server.uri()).unwrap();
    let payload = service
        .trigger_sync(&IntegrationId::new("weather-1"))
        .await
        .unwrap();

    // The client returns the raw (possibly nested) payload; unwrapping is
    // the cache's job
    assert_eq!(payload, json!({"sync_result": {"temp": 18}}));
}

#[tokio::test]
async fn get_metadata_parses_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integrations/news-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app": "ACME News",
            "category": "news",
            "metadata": {"headline": "stale but present"}
        })))
        .mount(&server)
        .await;

    let service = HttpIntegrationService::new(server.uri()).unwrap();
    let record = service
        .get_metadata(&IntegrationId::new("news-7"))
        .await
        .unwrap();

    assert_eq!(record.app, "ACME News");
    assert_eq!(record.category.as_deref(), Some("news"));
    assert_eq!(record.metadata, json!({"headline": "stale but present"}));
}

#[tokio::test]
async fn metadata_without_optional_fields_still_parses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integrations/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"app": "Stocks"})))
        .mount(&server)
        .await;

    let service = HttpIntegrationService::new(server.uri()).unwrap();
    let record = service.get_metadata(&IntegrationId::new("x")).await.unwrap();
    assert_eq!(record.app, "Stocks");
    assert!(record.category.is_none());
    assert_eq!(record.metadata, serde_json::Value::Null);
}

#[tokio::test]
async fn server_error_is_reported_not_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/integrations/broken/sync"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let service = HttpIntegrationService::new(server.uri()).unwrap();
    let err = service
        .trigger_sync(&IntegrationId::new("broken"))
        .await
        .unwrap_err();

    // Mapped into the core error at the trait boundary; the cache decides
    // the fallback, not the client
    assert!(err.to_string().contains("502"));
}
