//! Read-only CASC archive access.
//!
//! [`handler::CascHandler`] runs the full init pipeline (`.build.info` ->
//! build config -> `.idx` files -> encoding file -> root file) and then
//! exposes the read path's four public queries: `exists`, `open`,
//! `id_exists`, `open_by_id`.

pub mod blob;
pub mod error;
pub mod handler;
pub mod index;

pub use blob::BlobHandle;
pub use error::{CascError, Result};
pub use handler::CascHandler;
pub use index::IndexMap;
