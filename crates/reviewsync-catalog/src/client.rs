use std::time::Duration;

use reqwest::{Client, Url};

use reviewsync_core::Product;

use crate::error::CatalogError;
use crate::types::{ProductsPage, ReviewForm, WriteOutcome};

/// Maximum number of listing requests per discovery pass.
/// Guards against a catalog whose `current_page` never advances.
const MAX_PAGES: usize = 1_000;

const TOKEN_HEADER: &str = "X-Spree-Token";
const LISTING_PATH: &str = "api/v1/products/active_products";
const REVIEWS_PATH: &str = "api/reviews";

/// HTTP client for the catalog store.
///
/// Every request carries the store token header. When a proxy is configured
/// it is applied to all catalog traffic.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl CatalogClient {
    /// Creates a client for the catalog at `base_url`.
    ///
    /// `proxy` is a `host:port` (or full URL) of an HTTP proxy.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`CatalogError::InvalidProxy`] if `proxy` is not a usable proxy URL.
    /// - [`CatalogError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        token: &str,
        timeout_secs: u64,
        proxy: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("reviewsync/0.1");

        if let Some(proxy) = proxy {
            let proxy_url = if proxy.contains("://") {
                proxy.to_owned()
            } else {
                format!("http://{proxy}")
            };
            let proxy_cfg =
                reqwest::Proxy::all(&proxy_url).map_err(|e| CatalogError::InvalidProxy {
                    proxy: proxy.to_owned(),
                    source: e,
                })?;
            builder = builder.proxy(proxy_cfg);
        }

        // Exactly one trailing slash, so relative joins append to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: builder.build()?,
            base_url,
            token: token.to_owned(),
        })
    }

    /// Fetches one page of the active-products listing.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::UnexpectedStatus`] for any non-2xx status.
    /// - [`CatalogError::Deserialize`] if the body is not a listing page.
    pub async fn fetch_products_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<ProductsPage, CatalogError> {
        let url = self.listing_url(page, per_page)?;
        let response = self
            .client
            .get(url.clone())
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<ProductsPage>(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("active products page {page}"),
            source: e,
        })
    }

    /// Walks the whole active-products listing and returns every product that
    /// carries a part number.
    ///
    /// Pagination starts from a seed state of `current_page = 0, pages = 1`
    /// and requests `current_page + 1` until the catalog reports
    /// `current_page >= pages`. Entries without a part number, or that fail to
    /// parse as a product, are dropped without error.
    ///
    /// # Errors
    ///
    /// Any page failure aborts discovery and is returned as-is, since no
    /// per-product isolation is possible without the product list.
    /// Returns [`CatalogError::PaginationLimit`] after [`MAX_PAGES`] requests.
    pub async fn list_active_products(&self, per_page: u32) -> Result<Vec<Product>, CatalogError> {
        let mut products = Vec::new();
        let mut current_page = 0u32;
        let mut pages = 1u32;
        let mut requests = 0usize;

        while current_page < pages {
            requests += 1;
            if requests > MAX_PAGES {
                return Err(CatalogError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let page = self
                .fetch_products_page(current_page.saturating_add(1), per_page)
                .await?;
            current_page = page.current_page;
            pages = page.pages;

            let before = products.len();
            let listed = page.products.len();
            products.extend(page.products.into_iter().filter_map(parse_eligible));
            tracing::debug!(
                current_page,
                pages,
                listed,
                eligible = products.len() - before,
                "fetched active products page"
            );
        }

        Ok(products)
    }

    /// Posts one review to the review-creation endpoint.
    ///
    /// A response other than 200/201 is not an error: it comes back as
    /// [`WriteOutcome::Rejected`] with the response body for logging.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the request could not be sent.
    pub async fn create_review(&self, form: &ReviewForm) -> Result<WriteOutcome, CatalogError> {
        let url = self.endpoint(REVIEWS_PATH)?;
        let response = self
            .client
            .post(url)
            .header(TOKEN_HEADER, &self.token)
            .form(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        if matches!(status, 200 | 201) {
            return Ok(WriteOutcome::Created);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
        Ok(WriteOutcome::Rejected { status, body })
    }

    fn listing_url(&self, page: u32, per_page: u32) -> Result<Url, CatalogError> {
        let mut url = self.endpoint(LISTING_PATH)?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|e| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Parses a listing entry, keeping it only if it has a usable part number.
fn parse_eligible(entry: serde_json::Value) -> Option<Product> {
    let id = entry.get("id").map(ToString::to_string);
    match serde_json::from_value::<Product>(entry) {
        Ok(product) if product.eligible_part_number().is_some() => Some(product),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(
                product_id = id.as_deref().unwrap_or("<none>"),
                error = %e,
                "skipping unparseable catalog entry"
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
