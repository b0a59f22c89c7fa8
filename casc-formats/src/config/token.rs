//! Token (pipe-delimited, `name!type`-headered) config text, as used by
//! `.build.info`.

use std::collections::HashMap;

use super::error::{ConfigError, Result};

/// One parsed row, field name to raw string value.
pub type Row = HashMap<String, String>;

/// A parsed token config document: a header naming fields, then rows.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    fields: Vec<String>,
    rows: Vec<Row>,
}

impl TokenConfig {
    /// Parse pipe-delimited text whose first non-blank, non-comment line
    /// is a header row (`name!type|name!type|...`); every row after that
    /// is split on `|` and zipped against the header names.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let header = lines.next().ok_or(ConfigError::MissingHeader)?;
        let fields: Vec<String> = header
            .split('|')
            .map(|token| token.split('!').next().unwrap_or(token).trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for line in lines {
            let mut row = Row::new();
            for (name, value) in fields.iter().zip(line.split('|')) {
                row.insert(name.clone(), value.trim().to_string());
            }
            rows.push(row);
        }

        Ok(Self { fields, rows })
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The first row whose `Active` field parses as a nonzero integer.
    #[must_use]
    pub fn active_row(&self) -> Option<&Row> {
        self.rows.iter().find(|row| {
            row.get("Active")
                .and_then(|v| v.parse::<i64>().ok())
                .is_some_and(|v| v != 0)
        })
    }
}
