//! BLTE (Block Table Encoded) blob decoding.
//!
//! A BLTE blob is either a single implicit frame (no chunk table) or a
//! table of fixed-size chunk descriptors followed by that many frames.
//! This module only decodes the two frame kinds this workspace's CASC read
//! path needs: raw (`N`) and zlib (`Z`). Encrypted (`E`) and recursive
//! (`F`) frames are rejected outright.

pub mod error;

use binrw::{BinRead, BinReaderExt};
use flate2::read::ZlibDecoder;
use std::io::{Cursor as IoCursor, Read};
use tracing::{debug, trace};

use crate::reader::BinaryReader;
pub use error::{BlteError, Result};

const MAGIC: [u8; 4] = *b"BLTE";
const SENTINEL: u8 = 0x0F;

/// One entry of the BLTE chunk table, read big-endian straight off the
/// wire the way `cascette-formats::blte::header::ChunkInfo` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead)]
#[br(big)]
pub struct BlockDescriptor {
    pub compressed_size: u32,
    pub decompressed_size: u32,
    pub checksum: [u8; 16],
}

/// Decode a BLTE blob into its concatenated decompressed bytes.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BinaryReader::new(data);

    if reader.read_array::<4>()? != MAGIC {
        return Err(BlteError::BadMagic);
    }
    let header_size = reader.read_u32_be()?;
    debug!(header_size, total_len = data.len(), "parsed BLTE header");

    if header_size == 0 {
        let compressed_size = data.len() - 8;
        let frame = reader.read_bytes(compressed_size)?;
        return decode_frame(frame, None);
    }

    let sentinel = reader.read_u8()?;
    if sentinel != SENTINEL {
        return Err(BlteError::BadSentinel(sentinel));
    }
    let block_count = reader.read_u24_be()?;
    if block_count == 0 {
        return Err(BlteError::ZeroBlockCount);
    }
    if header_size != 24 * block_count + 12 {
        return Err(BlteError::BadHeaderSize {
            header_size,
            block_count,
        });
    }

    let table_bytes = reader.read_bytes(24 * block_count as usize)?;
    let mut table_cursor = IoCursor::new(table_bytes);
    let mut descriptors = Vec::with_capacity(block_count as usize);
    for _ in 0..block_count {
        descriptors.push(table_cursor.read_be::<BlockDescriptor>()?);
    }
    trace!(block_count, "parsed BLTE chunk table");

    let mut out = Vec::with_capacity(descriptors.iter().map(|d| d.decompressed_size as usize).sum());
    for descriptor in descriptors {
        let frame = reader.read_bytes(descriptor.compressed_size as usize)?;
        let decoded = decode_frame(frame, Some(descriptor.decompressed_size as usize))?;
        out.extend_from_slice(&decoded);
    }
    Ok(out)
}

fn decode_frame(frame: &[u8], expected_size: Option<usize>) -> Result<Vec<u8>> {
    let (&frame_type, payload) = frame
        .split_first()
        .ok_or(BlteError::UnknownFrameType(0))?;

    match frame_type {
        b'N' => Ok(payload.to_vec()),
        b'Z' => inflate_zlib(payload, expected_size),
        b'E' => Err(BlteError::EncryptedFrame),
        b'F' => Err(BlteError::RecursiveFrame),
        other => Err(BlteError::UnknownFrameType(other)),
    }
}

fn inflate_zlib(payload: &[u8], expected_size: Option<usize>) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(payload);
    let mut out = match expected_size {
        Some(size) => Vec::with_capacity(size),
        None => Vec::new(),
    };
    decoder
        .read_to_end(&mut out)
        .map_err(|e| BlteError::Decompression(e.to_string()))?;
    Ok(out)
}
