//! Integration tests for the upstream client's response normalization,
//! plus the statistics scan built on top of it.

use etsy_dashboard::clients::{ApiClient, ApiError};
use etsy_dashboard::pagination::ScanPolicy;
use etsy_dashboard::stats::{listing_stats, STATS_RANK_SIZE};
use etsy_dashboard::{ClientId, DashboardConfig, RedirectUri, SessionSecret};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_against(server: &MockServer) -> ApiClient {
    let config = DashboardConfig::builder()
        .client_id(ClientId::new("test-keystring").unwrap())
        .session_secret(SessionSecret::new("test-secret").unwrap())
        .redirect_uri(RedirectUri::new("http://localhost:3003/oauth/redirect").unwrap())
        .api_base(format!("{}/v3", server.uri()))
        .build()
        .unwrap();
    ApiClient::new(&config, "98765.token")
}

#[tokio::test]
async fn test_get_attaches_auth_headers_and_parses_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/application/openapi-ping"))
        .and(header("Authorization", "Bearer 98765.token"))
        .and(header("x-api-key", "test-keystring"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "application_id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_against(&server)
        .get("application/openapi-ping")
        .await
        .unwrap()
        .expect("body");
    assert_eq!(body["application_id"], 1);
}

#[tokio::test]
async fn test_no_content_normalizes_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/application/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let body = client_against(&server).get("application/empty").await.unwrap();
    assert!(body.is_none());
}

#[tokio::test]
async fn test_non_2xx_normalizes_to_a_typed_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/application/shops/1/listings/active"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid token"
        })))
        .mount(&server)
        .await;

    let result = client_against(&server)
        .get("application/shops/1/listings/active")
        .await;

    match result {
        Err(ApiError::Upstream(error)) => {
            assert_eq!(error.status, 401);
            assert_eq!(error.path, "application/shops/1/listings/active");
            assert_eq!(error.upstream_message(), Some("invalid token"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_error_body_degrades_to_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/application/broken"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let result = client_against(&server).get("application/broken").await;

    match result {
        Err(ApiError::Upstream(error)) => {
            assert_eq!(error.status, 502);
            assert_eq!(error.body["raw_body"], "<html>bad gateway</html>");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_listing_stats_scans_and_ranks_by_views() {
    let server = MockServer::start().await;

    // 30 listings with views 1..=30, served in one short page.
    let results: Vec<serde_json::Value> = (1u64..=30)
        .map(|id| json!({ "listing_id": id, "title": format!("Item {id}"), "views": id }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v3/application/shops/4242/listings/active"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 30,
            "results": results
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = listing_stats(
        &client_against(&server),
        4242,
        &ScanPolicy::without_delay(),
    )
    .await
    .unwrap();

    assert_eq!(stats.most_viewed.len(), STATS_RANK_SIZE);
    assert_eq!(stats.most_viewed[0].listing_id, 30);
    assert_eq!(stats.least_viewed[0].listing_id, 1);
    assert_eq!(stats.least_viewed.len(), STATS_RANK_SIZE);
}
