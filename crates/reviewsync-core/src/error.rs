use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read names file {path}: {source}")]
    NamesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse names file: {0}")]
    NamesFileParse(#[from] serde_yaml::Error),

    #[error("reviewer name pool is empty")]
    EmptyNamePool,
}
