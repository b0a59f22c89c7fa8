//! Encoding file parsing: content hash (MD5) to encoding entry.

use std::collections::HashMap;

use casc_crypto::{ContentHash, ContentKey};
use thiserror::Error;
use tracing::{debug, trace};

use crate::reader::{BinaryReader, ReaderError};
use crate::types::EncodingEntry;

/// Errors raised parsing an encoding file.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    Reader(#[from] ReaderError),
}

/// Result alias for this module's fallible operations.
pub type Result<T> = std::result::Result<T, EncodingError>;

/// content hash -> encoding entry
pub type EncodingMap = HashMap<ContentHash, EncodingEntry>;

const PROLOG_LEN: usize = 9;
const CHUNK_SIZE: usize = 0x1000;

/// Parse a decompressed encoding file into an [`EncodingMap`].
pub fn parse(data: &[u8]) -> Result<EncodingMap> {
    let mut reader = BinaryReader::new(data);
    let mut map = EncodingMap::new();

    reader.seek(PROLOG_LEN);
    let num_chunks_a = reader.read_u32_be()?;
    reader.seek_rel(5)?;
    let string_block = reader.read_u32_be()?;
    debug!(num_chunks_a, string_block, "parsed encoding header");

    reader.seek_rel(i64::from(string_block) + i64::from(num_chunks_a) * 32)?;
    let mut chunk_base = reader.tell();

    for _ in 0..num_chunks_a {
        reader.seek(chunk_base);
        loop {
            let key_count = reader.read_u16_le()?;
            if key_count == 0 {
                break;
            }
            let file_size = reader.read_u32_be()?;
            let content_hash = ContentHash::from_bytes(reader.read_array::<16>()?);
            let content_key = ContentKey::from_bytes(reader.read_array::<16>()?);
            if !content_hash.is_zero() {
                map.entry(content_hash).or_insert(EncodingEntry {
                    decoded_size: file_size,
                    content_key,
                });
            }
            reader.seek_rel(i64::from(key_count - 1) * 16)?;
        }
        chunk_base += CHUNK_SIZE;
    }
    trace!(entries = map.len(), "parsed encoding map");

    Ok(map)
}
