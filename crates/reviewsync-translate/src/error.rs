use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for translation response: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("unexpected HTTP status {status} from translation endpoint")]
    UnexpectedStatus { status: u16 },

    #[error("translation response contained no translated text")]
    MissingTranslation,

    #[error("invalid translation base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
