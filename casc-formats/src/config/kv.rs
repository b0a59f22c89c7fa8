//! Key-value config text (`key = v1 v2 …`), as used by per-build config
//! files under `data/config/XX/YY/KEY`.

use std::collections::HashMap;

use super::error::{ConfigError, Result};

/// A parsed key-value config document.
///
/// Values are kept as the raw whitespace-tokenized list the source stores
/// them as; callers that expect a single value take the first token.
#[derive(Debug, Clone, Default)]
pub struct KvConfig {
    entries: HashMap<String, Vec<String>>,
}

impl KvConfig {
    /// Parse `key = v1 v2 …` text, one entry per line. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (i, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().unwrap_or_default().trim();
            let value = parts
                .next()
                .ok_or(ConfigError::MalformedLine { line: i + 1 })?
                .trim();
            if key.is_empty() {
                return Err(ConfigError::MalformedLine { line: i + 1 });
            }
            let values = value.split_whitespace().map(String::from).collect();
            entries.insert(key.to_string(), values);
        }
        Ok(Self { entries })
    }

    /// All whitespace-tokenized values for a key.
    #[must_use]
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// The first token for a key, the common case for single-valued keys
    /// like `root` and `encoding`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values(key)?.first().map(String::as_str)
    }

    /// Require a key to be present, for callers that cannot proceed
    /// without it (e.g. `root`, `encoding`).
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }
}
