use std::path::PathBuf;

/// Immutable runtime configuration, built once at startup and handed to each
/// client's constructor.
#[derive(Clone)]
pub struct AppConfig {
    pub catalog_base_url: String,
    pub spree_token: String,
    pub proxy_url: Option<String>,
    pub per_page: u32,
    pub max_reviews: usize,
    pub min_review_words: usize,
    pub submitting_user_id: String,
    pub write_interval_ms: u64,
    pub http_timeout_secs: u64,
    pub rapidapi_key: String,
    pub rapidapi_host: String,
    pub provider_base_url: String,
    pub provider_country: String,
    pub provider_category: String,
    pub google_api_key: String,
    pub translate_base_url: String,
    pub source_lang: String,
    pub target_lang: String,
    pub names_path: Option<PathBuf>,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("catalog_base_url", &self.catalog_base_url)
            .field("spree_token", &"[redacted]")
            .field("proxy_url", &self.proxy_url.as_ref().map(|_| "[redacted]"))
            .field("per_page", &self.per_page)
            .field("max_reviews", &self.max_reviews)
            .field("min_review_words", &self.min_review_words)
            .field("submitting_user_id", &self.submitting_user_id)
            .field("write_interval_ms", &self.write_interval_ms)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("rapidapi_key", &"[redacted]")
            .field("rapidapi_host", &self.rapidapi_host)
            .field("provider_base_url", &self.provider_base_url)
            .field("provider_country", &self.provider_country)
            .field("provider_category", &self.provider_category)
            .field("google_api_key", &"[redacted]")
            .field("translate_base_url", &self.translate_base_url)
            .field("source_lang", &self.source_lang)
            .field("target_lang", &self.target_lang)
            .field("names_path", &self.names_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
