use thiserror::Error;

use crate::reader::ReaderError;

/// Errors raised decoding a BLTE blob.
#[derive(Debug, Error)]
pub enum BlteError {
    #[error("bad BLTE magic")]
    BadMagic,

    #[error("bad BLTE header: expected sentinel 0x0F, got {0:#04x}")]
    BadSentinel(u8),

    #[error("bad BLTE header: block count is zero")]
    ZeroBlockCount,

    #[error(
        "bad BLTE header: header_size {header_size} does not match 24 * block_count({block_count}) + 12"
    )]
    BadHeaderSize { header_size: u32, block_count: u32 },

    #[error("unsupported BLTE frame: encrypted")]
    EncryptedFrame,

    #[error("unsupported BLTE frame: recursive")]
    RecursiveFrame,

    #[error("unsupported BLTE frame type {0:#04x}")]
    UnknownFrameType(u8),

    #[error("zlib inflate failed: {0}")]
    Decompression(String),

    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error("malformed BLTE chunk table entry: {0}")]
    ChunkTable(#[from] binrw::Error),
}

/// Result alias for this module's fallible operations.
pub type Result<T> = std::result::Result<T, BlteError>;
