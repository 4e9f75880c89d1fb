//! Wire types for the catalog store API.
//!
//! ### Listing: `GET api/v1/products/active_products?per_page=P&page=N`
//!
//! ```json
//! { "current_page": 1, "pages": 3, "products": [{ "id": 77, "partnumber": "SKU1", ... }] }
//! ```
//!
//! Missing `current_page` / `pages` default to `0`, which ends pagination.
//! Product entries are kept as raw JSON here and parsed one by one by the
//! client, so a single malformed entry does not sink the whole page.
//!
//! ### Review creation: `POST api/reviews` (form-encoded)
//!
//! Success is HTTP 200 or 201; anything else is a rejected write.

use serde::{Deserialize, Serialize};

use reviewsync_core::{ProductId, TranslatedReview};

/// Fixed value of the `show_identifier` form field.
pub const SHOW_IDENTIFIER: &str = "1";

/// One page of the active-products listing.
#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
}

/// Form body for the review-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub review: String,
    pub show_identifier: &'static str,
    pub user_id: String,
    pub product_id: String,
    pub review_date: String,
}

impl ReviewForm {
    #[must_use]
    pub fn new(review: &TranslatedReview, product_id: &ProductId, user_id: &str) -> Self {
        Self {
            rating: review.rating.as_ref().map(ToString::to_string),
            name: review.reviewer_name.clone(),
            title: review.title.clone(),
            review: review.body.clone(),
            show_identifier: SHOW_IDENTIFIER,
            user_id: user_id.to_owned(),
            product_id: product_id.to_string(),
            review_date: review.formatted_date(),
        }
    }
}

/// Result of a single review write that reached the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Rejected { status: u16, body: String },
}

impl WriteOutcome {
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, WriteOutcome::Created)
    }
}
