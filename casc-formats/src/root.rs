//! Root file parsing: path-hash and file-data-id multimaps to content
//! key, filtered by a locale mask.

use std::collections::HashMap;

use casc_crypto::ContentHash;
use thiserror::Error;
use tracing::{debug, trace};

use crate::reader::{BinaryReader, ReaderError};

/// Errors raised parsing a root file.
#[derive(Debug, Error)]
pub enum RootError {
    #[error(transparent)]
    Reader(#[from] ReaderError),
}

/// Result alias for this module's fallible operations.
pub type Result<T> = std::result::Result<T, RootError>;

/// Jenkins96(path) -> content hashes, in root-block insertion order.
pub type RootByName = HashMap<u64, Vec<ContentHash>>;

/// file-data-id -> content hashes, in root-block insertion order.
pub type RootById = HashMap<u32, Vec<ContentHash>>;

const BLOCK_HEADER_LEN: usize = 12;
const RECORD_LEN: usize = 24;

/// Parse a decompressed root file under the given locale mask, returning
/// the two multimaps a query walks in parallel.
pub fn parse(data: &[u8], locale_mask: u32) -> Result<(RootByName, RootById)> {
    let mut reader = BinaryReader::new(data);
    let mut by_name = RootByName::new();
    let mut by_id = RootById::new();

    while reader.has_available(BLOCK_HEADER_LEN) {
        let count = reader.read_u32_le()? as usize;
        reader.seek_rel(4)?; // content flags, unused
        let locales = reader.read_u32_le()?;

        if locales & locale_mask == 0 {
            trace!(locales, count, "skipping root block outside locale mask");
            let skip = count * (4 + RECORD_LEN);
            reader.seek_rel(i64::try_from(skip).unwrap_or(i64::MAX))?;
            continue;
        }

        let mut file_data_ids = Vec::with_capacity(count);
        let mut prev: i64 = -1;
        for _ in 0..count {
            let delta = reader.read_u32_le()?;
            let id = (prev + 1 + i64::from(delta)) as u32;
            file_data_ids.push(id);
            prev = i64::from(id);
        }

        for &file_data_id in &file_data_ids {
            let key = ContentHash::from_bytes(reader.read_array::<16>()?);
            let name_hash = reader.read_u64_le()?;
            by_name.entry(name_hash).or_default().push(key);
            by_id.entry(file_data_id).or_default().push(key);
        }
    }
    debug!(
        names = by_name.len(),
        ids = by_id.len(),
        "parsed root file"
    );

    Ok((by_name, by_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use casc_crypto::hash_path;
    use pretty_assertions::assert_eq;

    fn build_block(count: u32, locales: u32, deltas: &[u32], keys: &[[u8; 16]]) -> Vec<u8> {
        build_block_with_hashes(
            count,
            locales,
            deltas,
            keys,
            &(0..keys.len() as u64).collect::<Vec<_>>(),
        )
    }

    fn build_block_with_hashes(
        count: u32,
        locales: u32,
        deltas: &[u32],
        keys: &[[u8; 16]],
        hashes: &[u64],
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(&locales.to_le_bytes());
        for d in deltas {
            data.extend_from_slice(&d.to_le_bytes());
        }
        for (key, hash) in keys.iter().zip(hashes) {
            data.extend_from_slice(key);
            data.extend_from_slice(&hash.to_le_bytes());
        }
        data
    }

    #[test]
    fn locale_mismatch_skips_exact_byte_count() {
        let block = build_block(2, 0x02, &[0, 0], &[[1; 16], [2; 16]]);
        let (by_name, by_id) = parse(&block, 0x04).unwrap();
        assert!(by_name.is_empty());
        assert!(by_id.is_empty());
    }

    #[test]
    fn matching_locale_populates_both_maps() {
        let block = build_block(2, locale_en_us(), &[0, 0], &[[1; 16], [2; 16]]);
        let (by_name, by_id) = parse(&block, locale_en_us()).unwrap();
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id[&0], vec![ContentHash::from_bytes([1; 16])]);
        assert_eq!(by_id[&1], vec![ContentHash::from_bytes([2; 16])]);
    }

    #[test]
    fn file_data_id_reconstructs_from_deltas() {
        // deltas [0, 2] -> ids [0, 3]
        let block = build_block(2, 0xFFFF_FFFF, &[0, 2], &[[1; 16], [2; 16]]);
        let (_, by_id) = parse(&block, 0xFFFF_FFFF).unwrap();
        assert!(by_id.contains_key(&0));
        assert!(by_id.contains_key(&3));
    }

    #[test]
    fn multiple_entries_for_same_hash_preserve_insertion_order() {
        let shared_hash = hash_path(b"SHARED.TXT");
        let mut data = build_block_with_hashes(1, 0xFFFF_FFFF, &[0], &[[1; 16]], &[shared_hash]);
        data.extend(build_block_with_hashes(
            1,
            0xFFFF_FFFF,
            &[0],
            &[[2; 16]],
            &[shared_hash],
        ));

        let (by_name, _) = parse(&data, 0xFFFF_FFFF).unwrap();
        assert_eq!(
            by_name[&shared_hash],
            vec![ContentHash::from_bytes([1; 16]), ContentHash::from_bytes([2; 16])]
        );
    }

    const fn locale_en_us() -> u32 {
        0x02
    }
}
