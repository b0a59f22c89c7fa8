//! Binary reader, BLTE decoder and on-disk text/binary format parsers for
//! the CASC read path.
//!
//! # Formats
//!
//! - [`blte`]: block-table-encoded blob decoding (`N`/`Z` frames).
//! - [`config`]: key-value build configs and the pipe-delimited
//!   `.build.info` token format.
//! - [`encoding`]: content hash to encoding entry.
//! - [`root`]: path-hash/file-data-id to content key multimaps.
//! - [`reader`]: the positioned byte-buffer cursor every parser above is
//!   built on.
//! - [`types`]: record types shared between the parsers.

pub mod blte;
pub mod config;
pub mod encoding;
pub mod reader;
pub mod root;
pub mod types;

pub use blte::BlteError;
pub use config::ConfigError;
pub use encoding::{EncodingError, EncodingMap};
pub use reader::{BinaryReader, ReaderError};
pub use root::{RootById, RootByName, RootError};
