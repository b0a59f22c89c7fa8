use thiserror::Error;

use casc_formats::{BlteError, ConfigError, EncodingError, ReaderError, RootError};

/// Errors raised by the CASC read path, from init through query.
#[derive(Debug, Error)]
pub enum CascError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open data blob {0}")]
    BlobOpenError(u16),

    #[error("failed to map data blob {index} at offset {offset}, size {size}")]
    BlobMapError { index: u16, offset: u32, size: u32 },

    #[error("no .idx files found for prefix bucket {0:#04x}")]
    NoIndexFiles(u8),

    #[error("malformed .idx record: {0}")]
    BadIndexRecord(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error(transparent)]
    Blte(#[from] BlteError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Root(#[from] RootError),

    #[error("no active build row in .build.info")]
    NoActiveBuild,

    #[error("required build config key {0:?} missing")]
    MissingBuildConfigKey(String),

    #[error("not found")]
    NotFound,
}

/// Result alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, CascError>;
