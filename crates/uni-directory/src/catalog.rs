//! Country catalog — the static table mapping country codes to dataset
//! files and display metadata.
//!
//! The table is read once at startup and never changes afterwards. Order
//! matters: it is the enumeration order of the registry and of the
//! "all countries" search base set.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{DirectoryError, DirectoryResult};

/// Flag shown for countries without an explicit one.
pub const DEFAULT_FLAG: &str = "🌍";

/// One configured country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub code: String,
    pub file: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
}

impl CountryEntry {
    pub fn new(code: &str, file: &str) -> Self {
        Self {
            code: code.to_lowercase(),
            file: file.to_string(),
            name: None,
            flag: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_flag(mut self, flag: &str) -> Self {
        self.flag = Some(flag.to_string());
        self
    }

    /// Display name, falling back to the code itself.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }

    /// Flag glyph, falling back to [`DEFAULT_FLAG`].
    pub fn display_flag(&self) -> &str {
        self.flag.as_deref().unwrap_or(DEFAULT_FLAG)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    countries: Vec<CountryEntry>,
}

/// Ordered, read-only country table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCatalog {
    entries: Vec<CountryEntry>,
}

impl CountryCatalog {
    /// Build a catalog, normalizing codes and rejecting duplicates.
    pub fn new(entries: Vec<CountryEntry>) -> DirectoryResult<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());

        for mut entry in entries {
            entry.code = entry.code.trim().to_lowercase();
            if entry.code.is_empty() {
                return Err(DirectoryError::Catalog("country code is empty".to_string()));
            }
            if entry.file.trim().is_empty() {
                return Err(DirectoryError::Catalog(format!(
                    "country '{}' has no dataset file",
                    entry.code
                )));
            }
            if !seen.insert(entry.code.clone()) {
                return Err(DirectoryError::Catalog(format!(
                    "duplicate country code '{}'",
                    entry.code
                )));
            }
            normalized.push(entry);
        }

        Ok(Self {
            entries: normalized,
        })
    }

    /// The countries shipped with the directory.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                CountryEntry::new("canada", "Canada_uni.txt")
                    .with_name("Canada")
                    .with_flag("🇨🇦"),
                CountryEntry::new("germany", "Germany_uni.txt")
                    .with_name("Germany")
                    .with_flag("🇩🇪"),
            ],
        }
    }

    /// Load a catalog from a JSON file of the form
    /// `{"countries": [{"code": "..", "file": "..", "name": "..", "flag": ".."}]}`.
    pub fn from_file(path: &Path) -> DirectoryResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> DirectoryResult<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::new(file.countries)
    }

    /// Case-insensitive lookup.
    pub fn get(&self, code: &str) -> Option<&CountryEntry> {
        let key = code.to_lowercase();
        self.entries.iter().find(|e| e.code == key)
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let catalog = CountryCatalog::builtin();
        let codes: Vec<_> = catalog.codes().collect();
        assert_eq!(codes, vec!["canada", "germany"]);
        assert_eq!(catalog.get("canada").unwrap().file, "Canada_uni.txt");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = CountryCatalog::builtin();
        assert_eq!(catalog.get("GERMANY").unwrap().display_name(), "Germany");
        assert!(catalog.get("france").is_none());
    }

    #[test]
    fn test_display_defaults() {
        let entry = CountryEntry::new("ireland", "Ireland_uni.txt");
        assert_eq!(entry.display_name(), "ireland");
        assert_eq!(entry.display_flag(), DEFAULT_FLAG);
    }

    #[test]
    fn test_from_json_normalizes_codes() {
        let catalog = CountryCatalog::from_json(
            r#"{"countries": [
                {"code": "Ireland", "file": "Ireland_uni.txt"},
                {"code": "canada", "file": "Canada_uni.txt", "name": "Canada", "flag": "🇨🇦"}
            ]}"#,
        )
        .unwrap();

        let codes: Vec<_> = catalog.codes().collect();
        assert_eq!(codes, vec!["ireland", "canada"]);
        assert_eq!(catalog.get("ireland").unwrap().display_flag(), DEFAULT_FLAG);
    }

    #[test]
    fn test_rejects_duplicate_codes() {
        let result = CountryCatalog::new(vec![
            CountryEntry::new("canada", "a.txt"),
            CountryEntry::new("CANADA", "b.txt"),
        ]);
        assert!(matches!(result, Err(DirectoryError::Catalog(_))));
    }

    #[test]
    fn test_rejects_missing_file() {
        let result = CountryCatalog::new(vec![CountryEntry::new("canada", " ")]);
        assert!(matches!(result, Err(DirectoryError::Catalog(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"countries": [{"code": "germany", "file": "Germany_uni.txt"}]}"#,
        )
        .unwrap();

        let catalog = CountryCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
