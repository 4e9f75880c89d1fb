//! Client for the catalog store (Spree) API.
//!
//! Discovers active products through the paginated listing endpoint and
//! writes reviews through the review-creation endpoint. Write pacing lives
//! in [`pacing`] so callers can swap the wall-clock gate for a no-op in tests.

pub mod client;
pub mod error;
pub mod pacing;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use pacing::{MinIntervalGate, Unpaced, WriteGate};
pub use types::{ProductsPage, ReviewForm, WriteOutcome};
