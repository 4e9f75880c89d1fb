//! Review lifecycle types.
//!
//! A [`Product`] comes from the catalog listing. Its part number is used to
//! source [`RawReview`]s from the provider, which the sampler turns into
//! [`EnrichedReview`]s and the translator into [`TranslatedReview`]s. Nothing
//! here outlives the processing of a single product.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// `strftime` pattern for review dates sent to the catalog.
pub const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque catalog product identifier.
///
/// The catalog returns numeric ids, but nothing in the pipeline does arithmetic
/// on them, so both numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// A product from the catalog's active-products listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Vendor part number (SKU); the join key with the review provider.
    /// Numeric part numbers are kept as their decimal text.
    #[serde(
        rename = "partnumber",
        default,
        deserialize_with = "deserialize_part_number"
    )]
    pub part_number: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

fn deserialize_part_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPartNumber {
        Number(Number),
        Text(String),
    }

    Ok(
        Option::<RawPartNumber>::deserialize(deserializer)?.map(|raw| match raw {
            RawPartNumber::Number(n) => n.to_string(),
            RawPartNumber::Text(s) => s,
        }),
    )
}

impl Product {
    /// Returns the part number when it is usable for review sourcing.
    ///
    /// Blank part numbers count as missing.
    #[must_use]
    pub fn eligible_part_number(&self) -> Option<&str> {
        self.part_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// A review as returned by the provider, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReview {
    pub title: Option<String>,
    pub body: String,
    pub rating: Option<Number>,
    /// Unix epoch seconds, UTC. `None` when the provider omitted it.
    pub timestamp: Option<i64>,
}

/// A review that passed the word-count filter and was given a display name
/// and a normalized date.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedReview {
    pub part_number: String,
    pub date: NaiveDate,
    pub reviewer_name: String,
    pub title: Option<String>,
    pub body: String,
    pub rating: Option<Number>,
}

impl EnrichedReview {
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format(REVIEW_DATE_FORMAT).to_string()
    }
}

/// Free-text review fields that go through translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Title,
    ReviewerName,
    Body,
}

impl std::fmt::Display for ReviewField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewField::Title => write!(f, "title"),
            ReviewField::ReviewerName => write!(f, "reviewer_name"),
            ReviewField::Body => write!(f, "body"),
        }
    }
}

/// The exact review payload injected into the catalog.
///
/// Text fields are translated; `rating`, `date` and `part_number` are carried
/// over from the [`EnrichedReview`] untouched. A field listed in
/// `degraded_fields` failed translation and holds empty text.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedReview {
    pub part_number: String,
    pub date: NaiveDate,
    pub reviewer_name: String,
    pub title: Option<String>,
    pub body: String,
    pub rating: Option<Number>,
    pub degraded_fields: Vec<ReviewField>,
}

impl TranslatedReview {
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format(REVIEW_DATE_FORMAT).to_string()
    }
}
