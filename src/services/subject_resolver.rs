use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

/// Maps opaque subject codes to human-readable names.
///
/// The table is loaded once at startup and never mutated afterwards, so
/// concurrent reads are safe. Unknown codes pass through unchanged; there
/// is no error case.
#[derive(Debug, Clone, Default)]
pub struct SubjectResolver {
    table: HashMap<String, String>,
}

impl SubjectResolver {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_table(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Load the code → name table from a JSON file.
    ///
    /// A missing or unreadable table is not a startup failure: every code
    /// then resolves to itself.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                info!(
                    "subject table {} not found, codes pass through unchanged",
                    path.display()
                );
                return Self::empty();
            }
        };
        match serde_json::from_str::<HashMap<String, String>>(&raw) {
            Ok(table) => {
                info!("loaded {} subject names from {}", table.len(), path.display());
                Self::from_table(table)
            }
            Err(err) => {
                warn!(
                    "subject table {} is not valid JSON ({err}), codes pass through unchanged",
                    path.display()
                );
                Self::empty()
            }
        }
    }

    /// Display name for `code`, or `code` itself when unmapped.
    pub fn resolve<'a>(&'a self, code: &'a str) -> &'a str {
        self.table.get(code).map(String::as_str).unwrap_or(code)
    }
}
