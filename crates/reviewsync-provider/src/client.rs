use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use reviewsync_core::RawReview;

use crate::error::ProviderError;
use crate::types::{ReviewsResponse, SearchResponse};

const SEARCH_PATH: &str = "product/search";
const REVIEWS_PATH: &str = "product/reviews";

/// Client for the reviews provider.
///
/// Authenticates with the RapidAPI key/host header pair on every request.
/// Country and category filters are fixed per client and default to `US`
/// and `aps` (all departments).
pub struct ReviewSourceClient {
    client: Client,
    base_url: Url,
    api_key: String,
    api_host: String,
    country: String,
    category: String,
}

/// Resolution policy for part-number searches: the provider's first result
/// wins, with no ranking or disambiguation of our own.
///
/// Returns `Ok(None)` when the search reports zero matches.
///
/// # Errors
///
/// Returns [`ProviderError::InconsistentSearch`] when the provider reports
/// matches but lists no products.
pub fn select_first_match<'a>(
    keyword: &str,
    search: &'a SearchResponse,
) -> Result<Option<&'a str>, ProviderError> {
    if search.total_products == 0 {
        return Ok(None);
    }
    search
        .products
        .first()
        .map(|p| Some(p.asin.as_str()))
        .ok_or_else(|| ProviderError::InconsistentSearch {
            keyword: keyword.to_owned(),
            total: search.total_products,
        })
}

impl ReviewSourceClient {
    /// Creates a client pointed at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        api_host: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("reviewsync/0.1")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
            api_host: api_host.to_owned(),
            country: "US".to_owned(),
            category: "aps".to_owned(),
        })
    }

    /// Overrides the fixed country and category search filters.
    #[must_use]
    pub fn with_filters(mut self, country: &str, category: &str) -> Self {
        self.country = country.to_owned();
        self.category = category.to_owned();
        self
    }

    /// Finds reviews for a vendor part number.
    ///
    /// Resolves the part number with [`select_first_match`], then fetches the
    /// first page of reviews for the resolved product. Returns an empty `Vec`
    /// when the search has no matches or the product has no reviews. Reviews
    /// keep the provider's order.
    ///
    /// # Errors
    ///
    /// Propagates any transport, status, or parse error from either request.
    pub async fn find_reviews(&self, part_number: &str) -> Result<Vec<RawReview>, ProviderError> {
        let Some(asin) = self.resolve_product(part_number).await? else {
            tracing::debug!(part_number, "provider has no product for part number");
            return Ok(Vec::new());
        };
        tracing::debug!(part_number, asin = %asin, "resolved provider product");
        self.fetch_reviews(&asin).await
    }

    /// Searches by part number and returns the provider identifier of the
    /// first match, if any.
    ///
    /// # Errors
    ///
    /// Propagates request errors and [`ProviderError::InconsistentSearch`].
    pub async fn resolve_product(&self, part_number: &str) -> Result<Option<String>, ProviderError> {
        let url = self.url(
            SEARCH_PATH,
            &[
                ("keyword", part_number),
                ("country", self.country.as_str()),
                ("category", self.category.as_str()),
            ],
        )?;
        let search: SearchResponse = self
            .get_json(&url, &format!("search(keyword={part_number})"))
            .await?;
        Ok(select_first_match(part_number, &search)?.map(str::to_owned))
    }

    /// Fetches the first page of reviews for a provider product.
    ///
    /// # Errors
    ///
    /// Propagates request and parse errors.
    pub async fn fetch_reviews(&self, asin: &str) -> Result<Vec<RawReview>, ProviderError> {
        let url = self.url(
            REVIEWS_PATH,
            &[
                ("country", self.country.as_str()),
                ("category", self.category.as_str()),
                ("asin", asin),
                ("page", "1"),
                ("variants", "0"),
            ],
        )?;
        let response: ReviewsResponse = self
            .get_json(&url, &format!("reviews(asin={asin})"))
            .await?;

        if response.total_reviews == 0 {
            return Ok(Vec::new());
        }
        Ok(response.reviews.into_iter().map(RawReview::from).collect())
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ProviderError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url.clone())
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchProduct;

    fn search(total: u64, asins: &[&str]) -> SearchResponse {
        SearchResponse {
            total_products: total,
            products: asins
                .iter()
                .map(|a| SearchProduct {
                    asin: (*a).to_owned(),
                    title: None,
                })
                .collect(),
        }
    }

    #[test]
    fn first_match_wins() {
        let s = search(3, &["A1", "A2", "A3"]);
        assert_eq!(select_first_match("SKU", &s).unwrap(), Some("A1"));
    }

    #[test]
    fn zero_total_means_no_match_even_with_products() {
        let s = search(0, &["A1"]);
        assert_eq!(select_first_match("SKU", &s).unwrap(), None);
    }

    #[test]
    fn positive_total_without_products_is_inconsistent() {
        let s = search(2, &[]);
        let err = select_first_match("SKU", &s).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::InconsistentSearch { total: 2, .. }
        ));
    }

    #[test]
    fn url_encodes_keyword_and_filters() {
        let client = ReviewSourceClient::new("https://reviews.example.com/", "k", "h", 5)
            .unwrap()
            .with_filters("GB", "electronics");
        let url = client
            .url(
                SEARCH_PATH,
                &[
                    ("keyword", "AB 12/3"),
                    ("country", client.country.as_str()),
                    ("category", client.category.as_str()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://reviews.example.com/product/search?keyword=AB+12%2F3&country=GB&category=electronics"
        );
    }
}
