use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigSourceError {
    #[error("missing parameter store key: {0}")]
    Missing(String),
    #[error("parameter store key {key} has an unexpected value: {value}")]
    Malformed { key: String, value: String },
    #[error("config backend error: {0}")]
    Backend(#[from] config::ConfigError),
}
