use thiserror::Error;

/// Errors produced while parsing or formatting content identifiers.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex in key: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
