//! `CascHandler`: the orchestrator that runs the init pipeline and
//! exposes the four public queries.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use casc_crypto::{hash_path, ContentHash, ContentKey};
use casc_formats::config::{KvConfig, TokenConfig};
use casc_formats::types::locale;
use casc_formats::{blte, encoding, root};

use crate::blob::BlobHandle;
use crate::error::{CascError, Result};
use crate::index::{self, IndexMap};

/// An initialized, read-only CASC archive.
///
/// All lookup tables are built during [`CascHandler::initialize`] and are
/// immutable afterwards; every blob referenced by the index is opened up
/// front, so queries never mutate shared state and can run concurrently.
pub struct CascHandler {
    root_path: PathBuf,
    index_map: IndexMap,
    encoding_map: encoding::EncodingMap,
    root_by_name: root::RootByName,
    root_by_id: root::RootById,
    blobs: HashMap<u16, BlobHandle>,
    build_id: Option<i32>,
}

impl CascHandler {
    /// Run the full init pipeline against a CASC archive rooted at
    /// `root_path`: `.build.info` -> active build row -> build config ->
    /// index files -> encoding file -> root file -> preopened blobs.
    pub fn initialize(root_path: impl AsRef<Path>) -> Result<Self> {
        let root_path = root_path.as_ref().to_path_buf();

        let build_info_text = std::fs::read_to_string(root_path.join(".build.info"))?;
        let build_info = TokenConfig::parse(&build_info_text)?;
        let active = build_info.active_row().ok_or(CascError::NoActiveBuild)?;

        let build_key = active
            .get("Build Key")
            .ok_or_else(|| CascError::MissingBuildConfigKey("Build Key".to_string()))?;
        let build_id = active.get("Version").and_then(|version| {
            let parts: Vec<&str> = version.split('.').collect();
            (parts.len() == 4).then(|| parts[3].parse().ok()).flatten()
        });
        tracing::info!(build_key, ?build_id, "selected active build");

        let build_config_text = std::fs::read_to_string(build_config_path(&root_path, build_key))?;
        let build_config = KvConfig::parse(&build_config_text)?;

        let data_dir = root_path.join("data").join("data");
        let index_map = index::build_index_map(&data_dir)?;

        let referenced_blobs: HashSet<u16> = index_map.values().map(|entry| entry.blob_index).collect();
        let mut blobs = HashMap::with_capacity(referenced_blobs.len());
        for blob_index in referenced_blobs {
            blobs.insert(blob_index, BlobHandle::open(&root_path, blob_index)?);
        }
        tracing::debug!(count = blobs.len(), "preopened data blobs");

        let encoding_values = build_config
            .values("encoding")
            .ok_or_else(|| CascError::MissingBuildConfigKey("encoding".to_string()))?;
        if encoding_values.len() != 2 {
            return Err(CascError::MissingBuildConfigKey(
                "encoding (expected 2 hex values)".to_string(),
            ));
        }
        let encoding_content_key: ContentKey = encoding_values[1]
            .parse()
            .map_err(|_| CascError::MissingBuildConfigKey("encoding".to_string()))?;

        let encoding_raw = open_by_content_key(&index_map, &blobs, &encoding_content_key)?;
        let encoding_data = blte::decode(&encoding_raw)?;
        let encoding_map = encoding::parse(&encoding_data)?;
        tracing::info!(entries = encoding_map.len(), "parsed encoding file");

        let root_content_hash: ContentHash = build_config
            .require("root")?
            .parse()
            .map_err(|_| CascError::MissingBuildConfigKey("root".to_string()))?;
        let root_encoding_entry = encoding_map.get(&root_content_hash).ok_or(CascError::NotFound)?;
        let root_raw = open_by_content_key(&index_map, &blobs, &root_encoding_entry.content_key)?;
        let root_data = blte::decode(&root_raw)?;
        let (root_by_name, root_by_id) = root::parse(&root_data, locale::ALL)?;
        tracing::info!(
            names = root_by_name.len(),
            ids = root_by_id.len(),
            "parsed root file"
        );

        Ok(Self {
            root_path,
            index_map,
            encoding_map,
            root_by_name,
            root_by_id,
            blobs,
            build_id,
        })
    }

    /// The selected build's numeric id, if `.build.info`'s `Version`
    /// field had four dot-separated parts.
    #[must_use]
    pub const fn build_id(&self) -> Option<i32> {
        self.build_id
    }

    /// Root directory this handler was initialized against.
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Whether `name` resolves to a complete chain: root -> encoding ->
    /// index.
    #[must_use]
    pub fn exists(&self, name: &[u8]) -> bool {
        self.resolve_by_name(name).is_some()
    }

    /// Whether file-data-id `id` resolves to a complete chain.
    #[must_use]
    pub fn id_exists(&self, id: u32) -> bool {
        self.resolve_by_id(id).is_some()
    }

    /// Open `name`, returning its decompressed bytes.
    pub fn open(&self, name: &[u8]) -> Result<Vec<u8>> {
        let content_key = self.resolve_by_name(name).ok_or(CascError::NotFound)?;
        self.open_content_key(content_key)
    }

    /// Open by file-data-id, returning its decompressed bytes.
    pub fn open_by_id(&self, id: u32) -> Result<Vec<u8>> {
        let content_key = self.resolve_by_id(id).ok_or(CascError::NotFound)?;
        self.open_content_key(content_key)
    }

    fn resolve_by_name(&self, name: &[u8]) -> Option<ContentKey> {
        let hash = hash_path(name);
        let candidates = self.root_by_name.get(&hash)?;
        self.first_complete_chain(candidates)
    }

    fn resolve_by_id(&self, id: u32) -> Option<ContentKey> {
        let candidates = self.root_by_id.get(&id)?;
        self.first_complete_chain(candidates)
    }

    /// Walk root candidates in insertion order, returning the content key
    /// of the first whose encoding and index entries both exist.
    fn first_complete_chain(&self, candidates: &[ContentHash]) -> Option<ContentKey> {
        candidates.iter().find_map(|content_hash| {
            let encoding_entry = self.encoding_map.get(content_hash)?;
            self.index_map.get(&encoding_entry.content_key.as_prefix9())?;
            Some(encoding_entry.content_key)
        })
    }

    fn open_content_key(&self, content_key: ContentKey) -> Result<Vec<u8>> {
        let raw = open_by_content_key(&self.index_map, &self.blobs, &content_key)?;
        blte::decode(&raw).map_err(CascError::from)
    }
}

/// Length of the blob-record header preceding every BLTE payload; the
/// header's fields are not read, only its length.
const BLOB_RECORD_HEADER_LEN: u32 = 30;

fn open_by_content_key(
    index_map: &IndexMap,
    blobs: &HashMap<u16, BlobHandle>,
    content_key: &ContentKey,
) -> Result<Vec<u8>> {
    let prefix = content_key.as_prefix9();
    let entry = index_map.get(&prefix).ok_or(CascError::NotFound)?;
    let blob = blobs
        .get(&entry.blob_index)
        .ok_or(CascError::BlobOpenError(entry.blob_index))?;
    blob.read(entry.offset + BLOB_RECORD_HEADER_LEN, entry.size - BLOB_RECORD_HEADER_LEN)
}

fn build_config_path(root: &Path, build_key: &str) -> PathBuf {
    let prefix_a = &build_key[0..2];
    let prefix_b = &build_key[2..4];
    root.join("data").join("config").join(prefix_a).join(prefix_b).join(build_key)
}
