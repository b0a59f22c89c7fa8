//! `.idx` file discovery and parsing: a flat map from content-key prefix
//! to the data-blob range that holds its bytes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use casc_formats::BinaryReader;
use tracing::{debug, trace};

use crate::error::Result;
use casc_formats::types::IndexEntry;

/// 9-byte content-key prefix -> index entry.
pub type IndexMap = HashMap<[u8; 9], IndexEntry>;

/// Select the highest-named `.idx` file for each of the 16 two-hex-digit
/// prefix buckets under `data_dir`.
pub fn select_index_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut best: HashMap<String, PathBuf> = HashMap::new();

    for entry in std::fs::read_dir(data_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_idx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("idx"));
        if !is_idx || name.len() < 2 {
            continue;
        }
        let prefix = name[..2].to_ascii_uppercase();
        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            continue;
        }

        match best.get(&prefix) {
            Some(existing) if existing.file_name() >= path.file_name() => {}
            _ => {
                best.insert(prefix, path);
            }
        }
    }

    let mut files: Vec<PathBuf> = best.into_values().collect();
    files.sort();
    debug!(count = files.len(), "selected .idx files");
    Ok(files)
}

/// Parse one `.idx` file's records into `(prefix, entry)` pairs.
pub fn parse_index_file(data: &[u8]) -> Result<Vec<([u8; 9], IndexEntry)>> {
    let mut reader = BinaryReader::new(data);

    let len = reader.read_u32_le()?;
    let block_start = (8 + len as usize + 0x0F) & !0x0F;
    reader.seek(block_start);

    let data_len = reader.read_u32_le()?;
    reader.seek_rel(4)?;

    let num_blocks = data_len as usize / 18;
    let mut out = Vec::with_capacity(num_blocks);

    for _ in 0..num_blocks {
        let mut key = [0u8; 9];
        key.copy_from_slice(reader.read_bytes(9)?);
        let index_hi = u16::from(reader.read_u8()?);
        let index_lo_word = reader.read_u32_be()?;
        let size = reader.read_u32_le()?;

        let blob_index = (index_hi << 2) | u16::try_from((index_lo_word & 0xC000_0000) >> 30).unwrap_or(0);
        let offset = index_lo_word & 0x3FFF_FFFF;

        out.push((key, IndexEntry { blob_index, offset, size }));
    }
    trace!(num_blocks, "parsed .idx file");
    Ok(out)
}

/// Parse every selected `.idx` file into one flat map, first-key-wins on
/// duplicates, in file-name order.
pub fn build_index_map(data_dir: &Path) -> Result<IndexMap> {
    let files = select_index_files(data_dir)?;
    let mut map = IndexMap::new();

    for path in files {
        let data = std::fs::read(&path)?;
        for (key, entry) in parse_index_file(&data)? {
            map.entry(key).or_insert(entry);
        }
    }
    debug!(entries = map.len(), "built index map");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build_idx_record(key_prefix: [u8; 9], index_hi: u8, index_lo_word: u32, size: u32) -> Vec<u8> {
        let mut rec = Vec::with_capacity(18);
        rec.extend_from_slice(&key_prefix);
        rec.push(index_hi);
        rec.extend_from_slice(&index_lo_word.to_be_bytes());
        rec.extend_from_slice(&size.to_le_bytes());
        rec
    }

    fn build_idx_file(records: &[u8]) -> Vec<u8> {
        // A minimal header: len = 0 so block_start = (8 + 0 + 0x0F) & !0x0F = 16.
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(&0u32.to_le_bytes());
        let data_len = records.len() as u32;
        data.extend_from_slice(&data_len.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(records);
        data
    }

    #[test]
    fn unpacks_blob_index_and_offset_per_spec_example() {
        let key = [0x9B; 9];
        let record = build_idx_record(key, 0x02, 0xC123_4567, 0x0000_1000);
        let file = build_idx_file(&record);
        let parsed = parse_index_file(&file).unwrap();
        assert_eq!(parsed.len(), 1);
        let (parsed_key, entry) = parsed[0];
        assert_eq!(parsed_key, key);
        assert_eq!(entry.blob_index, 0x0B);
        assert_eq!(entry.offset, 0x0123_4567);
        assert_eq!(entry.size, 0x0000_1000);
    }

    #[test]
    fn first_key_wins_across_files() {
        let key = [0x01; 9];
        let a = build_idx_file(&build_idx_record(key, 0, 0, 111));
        let b = build_idx_file(&build_idx_record(key, 0, 0, 222));
        let mut map = IndexMap::new();
        for (k, e) in parse_index_file(&a).unwrap() {
            map.entry(k).or_insert(e);
        }
        for (k, e) in parse_index_file(&b).unwrap() {
            map.entry(k).or_insert(e);
        }
        assert_eq!(map[&key].size, 111);
    }

    #[test]
    fn selects_highest_named_file_per_bucket() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("00abc001.idx"), b"a").unwrap();
        std::fs::write(dir.path().join("00abc002.idx"), b"b").unwrap();
        std::fs::write(dir.path().join("01abc001.idx"), b"c").unwrap();

        let files = select_index_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert!(names.contains(&"00abc002.idx".to_string()));
        assert!(!names.contains(&"00abc001.idx".to_string()));
        assert!(names.contains(&"01abc001.idx".to_string()));
    }
}
