//! Text-based config formats: key-value build configs and the
//! pipe-delimited `.build.info` token format.

pub mod error;
pub mod kv;
pub mod token;

pub use error::ConfigError;
pub use kv::KvConfig;
pub use token::TokenConfig;
