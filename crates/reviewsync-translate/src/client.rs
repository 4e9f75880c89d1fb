use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use reviewsync_core::{EnrichedReview, ReviewField, TranslatedReview};

use crate::error::TranslateError;

const TRANSLATE_PATH: &str = "language/translate/v2";

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: Option<TranslateData>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Outcome of translating one text field.
#[derive(Debug)]
pub enum Translation {
    Translated(String),
    /// The call failed; the field is carried as empty text.
    Degraded(TranslateError),
}

impl Translation {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Translation::Degraded(_))
    }

    /// The translated text, or an empty string for a degraded field.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Translation::Translated(text) => text,
            Translation::Degraded(_) => String::new(),
        }
    }
}

/// Translates free text between a fixed source and target language, one
/// remote call per text.
pub struct Translator {
    client: Client,
    endpoint: Url,
    api_key: String,
    source_lang: String,
    target_lang: String,
}

impl Translator {
    /// Creates a translator from `source_lang` to `target_lang`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`TranslateError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        source_lang: &str,
        target_lang: &str,
        timeout_secs: u64,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("reviewsync/0.1")
            .build()?;

        let invalid = |reason: String| TranslateError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|u| u.join(TRANSLATE_PATH))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            source_lang: source_lang.to_owned(),
            target_lang: target_lang.to_owned(),
        })
    }

    /// Translates `text`, never failing.
    ///
    /// Any failure is logged and returned as [`Translation::Degraded`].
    /// Empty input is returned as-is without a remote call.
    pub async fn translate(&self, text: &str) -> Translation {
        if text.trim().is_empty() {
            return Translation::Translated(text.to_owned());
        }
        match self.request(text).await {
            Ok(translated) => Translation::Translated(translated),
            Err(e) => {
                tracing::error!(error = %e, "translation failed; field degraded to empty text");
                Translation::Degraded(e)
            }
        }
    }

    /// Translates the title, reviewer name and body of a review, one call per
    /// field. Rating, date and part number are carried over unchanged.
    ///
    /// An absent title stays absent and costs no call.
    pub async fn translate_all(&self, review: &EnrichedReview) -> TranslatedReview {
        let mut degraded_fields = Vec::new();

        let title = match review.title.as_deref() {
            Some(title) => {
                let t = self.translate(title).await;
                if t.is_degraded() {
                    degraded_fields.push(ReviewField::Title);
                }
                Some(t.into_text())
            }
            None => None,
        };

        let name = self.translate(&review.reviewer_name).await;
        if name.is_degraded() {
            degraded_fields.push(ReviewField::ReviewerName);
        }

        let body = self.translate(&review.body).await;
        if body.is_degraded() {
            degraded_fields.push(ReviewField::Body);
        }

        if !degraded_fields.is_empty() {
            tracing::warn!(
                part_number = %review.part_number,
                degraded = ?degraded_fields,
                "review will be injected with untranslated fields left empty"
            );
        }

        TranslatedReview {
            part_number: review.part_number.clone(),
            date: review.date,
            reviewer_name: name.into_text(),
            title,
            body: body.into_text(),
            rating: review.rating.clone(),
            degraded_fields,
        }
    }

    fn request_url(&self, text: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("q", text)
            .append_pair("target", &self.target_lang)
            .append_pair("source", &self.source_lang)
            .append_pair("alt", "json");
        url
    }

    async fn request(&self, text: &str) -> Result<String, TranslateError> {
        let response = self.client.get(self.request_url(text)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: TranslateResponse =
            serde_json::from_str(&body).map_err(TranslateError::Deserialize)?;

        parsed
            .data
            .and_then(|d| d.translations.into_iter().next())
            .and_then(|t| t.translated_text)
            .ok_or(TranslateError::MissingTranslation)
    }
}
