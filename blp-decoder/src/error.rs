use thiserror::Error;

/// Errors raised decoding a BLP texture.
#[derive(Debug, Error)]
pub enum BlpError {
    #[error("unexpected end of BLP data: needed {needed} bytes at position {position}, had {available}")]
    Truncated {
        position: usize,
        needed: usize,
        available: usize,
    },

    #[error("bad BLP magic: {0:?}")]
    BadMagic([u8; 4]),

    #[error("unsupported BLP compression type {0}")]
    UnsupportedCompression(u8),

    #[error("unsupported BLP alpha compression type {0}")]
    UnsupportedAlphaCompression(u8),

    #[error("mipmap level 0 is empty (offset or size is zero)")]
    EmptyMipLevel,
}

/// Result alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, BlpError>;
