//! Loading the holdings document from disk.
//!
//! The document is a JSON object whose `"Updated Data"` key holds an array of
//! records. Entries missing a required field or carrying an unknown library
//! type are skipped, so everything handed to the engine is well-formed.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::models::Record;

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Records loaded from a document, plus how many entries were dropped
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub records: Vec<Record>,
    pub skipped: usize,
}

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "Updated Data", default)]
    entries: Vec<Value>,
}

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_json(&content)?;
        tracing::info!(
            "Loaded {} records from {} ({} skipped)",
            catalog.records.len(),
            path.display(),
            catalog.skipped
        );
        Ok(catalog)
    }

    /// Parse a catalog from a JSON document string
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let document: Document = serde_json::from_str(content)?;

        let mut records = Vec::with_capacity(document.entries.len());
        let mut skipped = 0;

        for (index, entry) in document.entries.into_iter().enumerate() {
            match serde_json::from_value::<Record>(entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::debug!("Skipping entry {}: {}", index, e);
                    skipped += 1;
                }
            }
        }

        Ok(Self { records, skipped })
    }

    /// Number of usable records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog has no usable records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by its identifier (case-insensitive)
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id.eq_ignore_ascii_case(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LibraryKind;
    use tempfile::tempdir;

    const DOCUMENT: &str = r#"{
        "Updated Data": [
            {
                "institutionName": "Washington State University",
                "institutionIdentifier": "WSU",
                "n": "310",
                "City": "Pullman",
                "State": "WA",
                "Country": "US",
                "libraryType": "Academic",
                "latitude": "46.73",
                "longitude": "-117.16"
            },
            {
                "institutionName": "No identifier",
                "libraryType": "Special"
            },
            {
                "institutionName": "Bookshop",
                "institutionIdentifier": "BKS",
                "libraryType": "Bookstore"
            },
            null,
            {
                "institutionName": "Hromadske Archive",
                "institutionIdentifier": "HRA",
                "libraryType": "Museums & Archives"
            }
        ]
    }"#;

    #[test]
    fn test_from_json_skips_malformed() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.skipped, 3);
        assert_eq!(catalog.records[0].id, "WSU");
        assert_eq!(catalog.records[1].kind, LibraryKind::MuseumsArchives);
        assert!(catalog.records[1].count.is_none());
    }

    #[test]
    fn test_missing_data_key_is_empty() {
        let catalog = Catalog::from_json(r#"{"Other": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.skipped, 0);
    }

    #[test]
    fn test_invalid_json() {
        let result = Catalog::from_json("not json");
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();
        assert_eq!(catalog.find("wsu").map(|r| r.name.as_str()), Some("Washington State University"));
        assert!(catalog.find("BKS").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, DOCUMENT).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_nonexistent() {
        let result = Catalog::load("/nonexistent/data.json");
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
