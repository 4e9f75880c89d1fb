use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reviewsync_catalog::Unpaced;
use reviewsync_core::{AppConfig, NamePool};

use super::*;

const LISTING: &str = "/api/v1/products/active_products";
const REVIEWS: &str = "/api/reviews";
const TRANSLATE: &str = "/language/translate/v2";

/// One mock server per external service.
struct Services {
    catalog: MockServer,
    provider: MockServer,
    translate: MockServer,
}

impl Services {
    async fn start() -> Self {
        Self {
            catalog: MockServer::start().await,
            provider: MockServer::start().await,
            translate: MockServer::start().await,
        }
    }

    fn config(&self, min_review_words: usize, max_reviews: usize) -> AppConfig {
        AppConfig {
            catalog_base_url: self.catalog.uri(),
            spree_token: "spree-token".to_owned(),
            proxy_url: None,
            per_page: 100,
            max_reviews,
            min_review_words,
            submitting_user_id: "32594".to_owned(),
            write_interval_ms: 0,
            http_timeout_secs: 5,
            rapidapi_key: "rapid-key".to_owned(),
            rapidapi_host: "reviews.test".to_owned(),
            provider_base_url: self.provider.uri(),
            provider_country: "US".to_owned(),
            provider_category: "aps".to_owned(),
            google_api_key: "google-key".to_owned(),
            translate_base_url: self.translate.uri(),
            source_lang: "en".to_owned(),
            target_lang: "es".to_owned(),
            names_path: None,
            log_level: "info".to_owned(),
        }
    }

    fn pipeline(&self, min_review_words: usize, max_reviews: usize) -> Pipeline<Unpaced> {
        Pipeline::with_parts(
            &self.config(min_review_words, max_reviews),
            NamePool::new(["Ana"]).unwrap(),
            Unpaced,
            StdRng::seed_from_u64(42),
        )
        .expect("pipeline construction")
    }

    async fn list_products(&self, products: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(LISTING))
            .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
                "current_page": 1,
                "pages": 1,
                "products": products
            })))
            .mount(&self.catalog)
            .await;
    }

    async fn search_finds(&self, keyword: &str, asin: &str) {
        Mock::given(method("GET"))
            .and(path("/product/search"))
            .and(query_param("keyword", keyword))
            .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
                "totalProducts": 1,
                "products": [{ "asin": asin }]
            })))
            .mount(&self.provider)
            .await;
    }

    async fn reviews_for(&self, asin: &str, reviews: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/product/reviews"))
            .and(query_param("asin", asin))
            .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
                "total_reviews": reviews.as_array().map_or(0, Vec::len),
                "reviews": reviews
            })))
            .mount(&self.provider)
            .await;
    }

    async fn translate_everything_to(&self, text: &str) {
        Mock::given(method("GET"))
            .and(path(TRANSLATE))
            .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
                "data": { "translations": [{ "translatedText": text }] }
            })))
            .mount(&self.translate)
            .await;
    }

    async fn accept_writes(&self, expected: u64) {
        Mock::given(method("POST"))
            .and(path(REVIEWS))
            .respond_with(ResponseTemplate::new(201))
            .expect(expected)
            .mount(&self.catalog)
            .await;
    }
}

fn review(body: &str) -> serde_json::Value {
    json!({ "title": "Title", "review": body, "rating": 5, "date": { "unix": 1_700_000_000 } })
}

const TWELVE_WORDS: &str = "this kettle boils water fast and looks great on my kitchen counter";

#[tokio::test]
async fn single_product_end_to_end() {
    let services = Services::start().await;
    services
        .list_products(json!([{ "id": 77, "partnumber": "SKU1" }]))
        .await;
    services.search_finds("SKU1", "A1").await;
    services.reviews_for("A1", json!([review(TWELVE_WORDS)])).await;
    services.translate_everything_to("traducido").await;

    Mock::given(method("POST"))
        .and(path(REVIEWS))
        .and(body_string_contains("product_id=77"))
        .and(body_string_contains("rating=5"))
        .and(body_string_contains("review_date=2023-11-14"))
        .and(body_string_contains("review=traducido"))
        .and(body_string_contains("show_identifier=1"))
        .and(body_string_contains("user_id=32594"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&services.catalog)
        .await;

    let summary = services.pipeline(5, 5).run().await.expect("run should complete");

    assert_eq!(summary.products, 1);
    assert_eq!(summary.reviews_injected, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);

    let translations = services.translate.received_requests().await.unwrap();
    assert_eq!(translations.len(), 3, "title, name and body are translated");
}

#[tokio::test]
async fn no_search_matches_skips_without_injection() {
    let services = Services::start().await;
    services
        .list_products(json!([{ "id": 5, "partnumber": "SKU5" }]))
        .await;
    Mock::given(method("GET"))
        .and(path("/product/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({ "totalProducts": 0, "products": [] })),
        )
        .mount(&services.provider)
        .await;
    services.accept_writes(0).await;

    let summary = services.pipeline(5, 5).run().await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.reviews_injected, 0);
}

#[tokio::test]
async fn short_reviews_never_reach_translation_or_catalog() {
    let services = Services::start().await;
    services
        .list_products(json!([{ "id": 6, "partnumber": "SKU6" }]))
        .await;
    services.search_finds("SKU6", "A6").await;
    services.reviews_for("A6", json!([review("too short")])).await;
    services.translate_everything_to("traducido").await;
    services.accept_writes(0).await;

    let summary = services.pipeline(5, 5).run().await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert!(services.translate.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn products_without_part_number_are_never_sourced() {
    let services = Services::start().await;
    services
        .list_products(json!([{ "id": 1 }, { "id": 2, "partnumber": "" }]))
        .await;

    let summary = services.pipeline(5, 5).run().await.unwrap();

    assert_eq!(summary.products, 0);
    assert!(services.provider.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn failing_product_does_not_stop_the_batch() {
    let services = Services::start().await;
    services
        .list_products(json!([
            { "id": 1, "partnumber": "BAD" },
            { "id": 2, "partnumber": "GOOD" }
        ]))
        .await;
    Mock::given(method("GET"))
        .and(path("/product/search"))
        .and(query_param("keyword", "BAD"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&services.provider)
        .await;
    services.search_finds("GOOD", "G1").await;
    services.reviews_for("G1", json!([review(TWELVE_WORDS)])).await;
    services.translate_everything_to("traducido").await;

    Mock::given(method("POST"))
        .and(path(REVIEWS))
        .and(body_string_contains("product_id=2"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&services.catalog)
        .await;

    let summary = services.pipeline(5, 5).run().await.unwrap();

    assert_eq!(summary.products, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reviews_injected, 1);
}

#[tokio::test]
async fn translation_failure_injects_empty_fields() {
    let services = Services::start().await;
    services
        .list_products(json!([{ "id": 9, "partnumber": "SKU9" }]))
        .await;
    services.search_finds("SKU9", "A9").await;
    services.reviews_for("A9", json!([review(TWELVE_WORDS)])).await;
    Mock::given(method("GET"))
        .and(path(TRANSLATE))
        .respond_with(ResponseTemplate::new(503))
        .mount(&services.translate)
        .await;

    Mock::given(method("POST"))
        .and(path(REVIEWS))
        .and(body_string_contains("name=&"))
        .and(body_string_contains("title=&"))
        .and(body_string_contains("review=&"))
        .and(body_string_contains("product_id=9"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&services.catalog)
        .await;

    let summary = services.pipeline(5, 5).run().await.unwrap();

    assert_eq!(summary.reviews_injected, 1);
    assert_eq!(summary.degraded_fields, 3);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn injected_reviews_never_exceed_the_cap() {
    let services = Services::start().await;
    services
        .list_products(json!([{ "id": 3, "partnumber": "SKU3" }]))
        .await;
    services.search_finds("SKU3", "A3").await;
    let many: Vec<serde_json::Value> = (0..8).map(|_| review(TWELVE_WORDS)).collect();
    services.reviews_for("A3", json!(many)).await;
    services.translate_everything_to("traducido").await;
    services.accept_writes(3).await;

    let summary = services.pipeline(5, 3).run().await.unwrap();

    assert_eq!(summary.reviews_injected, 3);
}

#[tokio::test]
async fn rejected_writes_are_counted_and_not_retried() {
    let services = Services::start().await;
    services
        .list_products(json!([{ "id": 4, "partnumber": "SKU4" }]))
        .await;
    services.search_finds("SKU4", "A4").await;
    services
        .reviews_for("A4", json!([review(TWELVE_WORDS), review(TWELVE_WORDS)]))
        .await;
    services.translate_everything_to("traducido").await;
    Mock::given(method("POST"))
        .and(path(REVIEWS))
        .respond_with(ResponseTemplate::new(422).set_body_string("duplicate"))
        .expect(2)
        .mount(&services.catalog)
        .await;

    let summary = services.pipeline(5, 5).run().await.unwrap();

    assert_eq!(summary.writes_rejected, 2);
    assert_eq!(summary.reviews_injected, 0);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn discovery_failure_is_fatal() {
    let services = Services::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING))
        .respond_with(ResponseTemplate::new(502))
        .mount(&services.catalog)
        .await;

    let result = services.pipeline(5, 5).run().await;

    assert!(
        matches!(result, Err(CatalogError::UnexpectedStatus { status: 502, .. })),
        "expected UnexpectedStatus(502), got: {result:?}"
    );
    assert!(services.provider.received_requests().await.unwrap().is_empty());
}
