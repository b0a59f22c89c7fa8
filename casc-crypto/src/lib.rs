//! Hashing and content identifiers used by the CASC read path.
//!
//! This crate has no knowledge of on-disk file formats; it only provides
//! the primitives other crates in this workspace key their lookups with:
//! [`jenkins96`] for path hashing and [`keys`] for the opaque 16-byte
//! content hashes and content keys CASC threads through encoding, root
//! and index records.

pub mod error;
pub mod jenkins96;
pub mod keys;

pub use error::CryptoError;
pub use jenkins96::{hash_path, hashlittle, hashlittle2, jenkins96_pywow, normalize_path};
pub use keys::{ContentHash, ContentKey};
