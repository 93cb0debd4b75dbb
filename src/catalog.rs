use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// A single playable entry from the catalog file.
///
/// Entries are immutable once loaded; the catalog never mutates, refetches,
/// or reorders them after startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameEntry {
    pub id: i64,
    pub title: String,
    pub thumbnail: String,
    pub url: String,
}

/// Why a catalog source could not be turned into entries.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not a valid game list: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Get a user-friendly message for the status line.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Io(e) => format!("Could not read the catalog file: {}", e),
            CatalogError::Parse(e) => format!("Catalog file is malformed: {}", e),
        }
    }
}

/// Default catalog compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../data/games.json");

/// Read-only store for the full set of game entries.
///
/// Entry order is source order and doubles as the display order.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<GameEntry>,
}

impl Catalog {
    /// A catalog with no entries, the fallback for unreadable sources.
    pub fn empty() -> Self {
        Catalog {
            entries: Vec::new(),
        }
    }

    /// Build a catalog from already-decoded entries.
    pub fn from_entries(entries: Vec<GameEntry>) -> Self {
        Catalog { entries }
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse a catalog from raw JSON: a flat array of entry records.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<GameEntry> = serde_json::from_str(raw)?;
        Ok(Self::from_entries(entries))
    }

    /// The catalog bundled into the binary, used when no source file exists.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CATALOG).unwrap_or_else(|_| Self::empty())
    }

    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write catalog");
        file
    }

    #[test]
    fn test_load_preserves_source_order() {
        let file = write_catalog(
            r#"[
                {"id": 7, "title": "Chess Arena", "thumbnail": "https://a/7.png", "url": "https://a/7"},
                {"id": 2, "title": "Speed Run", "thumbnail": "https://a/2.png", "url": "https://a/2"},
                {"id": 5, "title": "Hextris", "thumbnail": "https://a/5.png", "url": "https://a/5"}
            ]"#,
        );

        let catalog = Catalog::load(file.path()).expect("load");
        let ids: Vec<i64> = catalog.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 2, 5]);
        assert_eq!(catalog.entries()[0].title, "Chess Arena");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::load(Path::new("/nonexistent/games.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(err.user_message().contains("Could not read"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let file = write_catalog("[{\"id\": 1, \"title\": ");
        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.user_message().contains("malformed"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let catalog = Catalog::from_json(
            r#"[{"id": 1, "title": "2048", "thumbnail": "https://a/1.png",
                 "url": "https://a/1", "genre": "puzzle", "featured": true}]"#,
        )
        .expect("parse");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].title, "2048");
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let err = Catalog::from_json(r#"[{"id": 1, "title": "2048"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_bundled_catalog_parses_with_unique_ids() {
        let catalog = Catalog::bundled();
        assert!(!catalog.is_empty());

        let mut ids: Vec<i64> = catalog.entries().iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
