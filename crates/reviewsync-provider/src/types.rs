//! Provider response types.
//!
//! ### Search: `GET product/search?keyword=&country=&category=`
//!
//! ```json
//! { "totalProducts": 12, "products": [{ "asin": "B07XYZ", "title": "..." }] }
//! ```
//!
//! ### Reviews: `GET product/reviews?country=&category=&asin=&page=1&variants=0`
//!
//! ```json
//! { "total_reviews": 40, "reviews": [{ "title": "...", "review": "...", "rating": 5, "date": { "unix": 1700000000 } }] }
//! ```
//!
//! Counters default to `0` when absent, which reads as "no results". A review
//! without `date.unix` still parses; the sampler decides what to do with it.

use serde::Deserialize;
use serde_json::Number;

use reviewsync_core::RawReview;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "totalProducts", default)]
    pub total_products: u64,
    #[serde(default)]
    pub products: Vec<SearchProduct>,
}

#[derive(Debug, Deserialize)]
pub struct SearchProduct {
    pub asin: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub reviews: Vec<ProviderReview>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderReview {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "review", default)]
    pub body: Option<String>,
    #[serde(default)]
    pub rating: Option<Number>,
    #[serde(default)]
    pub date: ReviewDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewDate {
    #[serde(default)]
    pub unix: Option<i64>,
}

impl From<ProviderReview> for RawReview {
    fn from(review: ProviderReview) -> Self {
        RawReview {
            title: review.title,
            body: review.body.unwrap_or_default(),
            rating: review.rating,
            timestamp: review.date.unix,
        }
    }
}
