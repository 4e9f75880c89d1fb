//! Review translation through the Google Translate v2 REST API.
//!
//! Translation is best-effort: a failed field degrades to empty text instead
//! of failing the review.

pub mod client;
pub mod error;

pub use client::{Translation, Translator};
pub use error::TranslateError;
