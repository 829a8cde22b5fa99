//! Name correction table.
//!
//! A JSON object mapping names as OCR reads them to the real player names,
//! e.g. `{ "A1ice": "Alice" }`. Loaded once at startup.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct NameCorrection {
    table: HashMap<String, String>,
}

impl NameCorrection {
    #[cfg(test)]
    pub fn from_map(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Loads the table from a JSON file.
    ///
    /// A missing file gives an empty table; a file that exists but isn't a
    /// JSON object of strings is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            crate::log(&format!(
                "Name correction file not found: {}. Using names as read.",
                path.display()
            ));
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read name corrections: {}", path.display()))?;
        let table: HashMap<String, String> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse name corrections: {}", path.display()))?;

        crate::log(&format!(
            "Loaded {} name corrections from {}",
            table.len(),
            path.display()
        ));
        Ok(Self { table })
    }

    /// Canonical name for `raw`, or `raw` itself when there's no entry.
    pub fn correct<'a>(&'a self, raw: &'a str) -> &'a str {
        self.table.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
