use thiserror::Error;

/// Errors raised parsing key-value or token-style config text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("malformed key-value line {line}: expected exactly one '=' separator")]
    MalformedLine { line: usize },

    #[error("token config has no header row")]
    MissingHeader,

    #[error("missing required key {0:?}")]
    MissingKey(String),
}

/// Result alias for this module's fallible operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
