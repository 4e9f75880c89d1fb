//! Client for the external product-reviews provider (RapidAPI).
//!
//! Resolves a vendor part number to the provider's product identifier and
//! fetches that product's first page of reviews.

pub mod client;
pub mod error;
pub mod types;

pub use client::{select_first_match, ReviewSourceClient};
pub use error::ProviderError;
pub use types::{ReviewsResponse, SearchResponse};
