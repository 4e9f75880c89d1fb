//! Shared domain types and configuration for reviewsync.
//!
//! Every other crate in the workspace depends on this one for the review
//! lifecycle types (`Product` → `RawReview` → `EnrichedReview` →
//! `TranslatedReview`) and for the immutable [`AppConfig`] built once at
//! startup.

pub mod app_config;
pub mod config;
pub mod error;
pub mod names;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use names::NamePool;
pub use types::{
    EnrichedReview, Product, ProductId, RawReview, ReviewField, TranslatedReview, REVIEW_DATE_FORMAT,
};
