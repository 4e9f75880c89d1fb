//! Integration tests for `ReviewSourceClient` using wiremock HTTP mocks.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reviewsync_provider::{ProviderError, ReviewSourceClient};

fn test_client(base_url: &str) -> ReviewSourceClient {
    ReviewSourceClient::new(base_url, "test-key", "reviews.test", 5)
        .expect("client construction should not fail")
}

async fn mount_search(server: &MockServer, keyword: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/product/search"))
        .and(query_param("keyword", keyword))
        .and(query_param("country", "US"))
        .and(query_param("category", "aps"))
        .and(header("x-rapidapi-key", "test-key"))
        .and(header("x-rapidapi-host", "reviews.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn find_reviews_resolves_first_match_and_fetches_reviews() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "SKU1",
        json!({"totalProducts": 2, "products": [{"asin": "A1"}, {"asin": "A2"}]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/product/reviews"))
        .and(query_param("asin", "A1"))
        .and(query_param("page", "1"))
        .and(query_param("variants", "0"))
        .and(query_param("country", "US"))
        .and(query_param("category", "aps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "total_reviews": 2,
            "reviews": [
                {"title": "First", "review": "one two three", "rating": 5, "date": {"unix": 1_700_000_000}},
                {"title": "Second", "review": "four five", "rating": 3, "date": {"unix": 1_600_000_000}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reviews = test_client(&server.uri())
        .find_reviews("SKU1")
        .await
        .expect("should fetch reviews");

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].title.as_deref(), Some("First"));
    assert_eq!(reviews[0].timestamp, Some(1_700_000_000));
    assert_eq!(reviews[1].body, "four five");
}

#[tokio::test]
async fn review_without_timestamp_does_not_fail_the_page() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "SKU1",
        json!({"totalProducts": 1, "products": [{"asin": "A1"}]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/product/reviews"))
        .and(query_param("asin", "A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "total_reviews": 2,
            "reviews": [
                {"review": "a long enough review body", "date": {"unix": 1_700_000_000}},
                {"review": "short", "date": {"date": "n/a"}}
            ]
        })))
        .mount(&server)
        .await;

    let reviews = test_client(&server.uri())
        .find_reviews("SKU1")
        .await
        .expect("a missing timestamp should not fail the response");

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].timestamp, Some(1_700_000_000));
    assert_eq!(reviews[1].timestamp, None);
}

#[tokio::test]
async fn zero_search_matches_returns_empty_without_fetching_reviews() {
    let server = MockServer::start().await;
    mount_search(&server, "NOPE", json!({"totalProducts": 0, "products": []})).await;

    Mock::given(method("GET"))
        .and(path("/product/reviews"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let reviews = test_client(&server.uri()).find_reviews("NOPE").await.unwrap();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn zero_total_reviews_returns_empty() {
    let server = MockServer::start().await;
    mount_search(&server, "SKU2", json!({"totalProducts": 1, "products": [{"asin": "B2"}]})).await;

    Mock::given(method("GET"))
        .and(path("/product/reviews"))
        .and(query_param("asin", "B2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "total_reviews": 0,
            "reviews": []
        })))
        .mount(&server)
        .await;

    let reviews = test_client(&server.uri()).find_reviews("SKU2").await.unwrap();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn search_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).find_reviews("SKU1").await;
    assert!(
        matches!(result, Err(ProviderError::UnexpectedStatus { status: 429, .. })),
        "expected UnexpectedStatus(429), got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_reviews_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    mount_search(&server, "SKU3", json!({"totalProducts": 1, "products": [{"asin": "C3"}]})).await;

    Mock::given(method("GET"))
        .and(path("/product/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).find_reviews("SKU3").await;
    assert!(
        matches!(result, Err(ProviderError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn inconsistent_search_is_an_error() {
    let server = MockServer::start().await;
    mount_search(&server, "SKU4", json!({"totalProducts": 5, "products": []})).await;

    let result = test_client(&server.uri()).find_reviews("SKU4").await;
    assert!(
        matches!(result, Err(ProviderError::InconsistentSearch { total: 5, .. })),
        "expected InconsistentSearch, got: {result:?}"
    );
}

#[tokio::test]
async fn custom_filters_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/product/search"))
        .and(query_param("country", "DE"))
        .and(query_param("category", "garden"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"totalProducts": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_filters("DE", "garden");
    assert!(client.find_reviews("SKU5").await.unwrap().is_empty());
}
