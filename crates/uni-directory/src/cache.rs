//! Per-country dataset cache.
//!
//! Entries are populated on first access and never invalidated; a process
//! restart is the only way to pick up changed files. Concurrent first
//! accesses may load the same dataset twice, but only the first insert is
//! kept, so every caller sees one snapshot per country.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::types::{DirectoryResult, University};

/// Shared, immutable list of one country's records.
pub type Dataset = Arc<Vec<University>>;

/// Owned cache of parsed datasets, keyed by lowercase country code.
#[derive(Debug, Default)]
pub struct DatasetCache {
    datasets: RwLock<HashMap<String, Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached dataset for `code`, if already loaded.
    pub fn get(&self, code: &str) -> Option<Dataset> {
        let datasets = self.datasets.read().unwrap_or_else(|e| e.into_inner());
        datasets.get(code).cloned()
    }

    /// Return the cached dataset or run `load` and cache its result.
    ///
    /// `load` runs without holding the lock. Failures are returned and not
    /// cached.
    pub fn get_or_load<F>(&self, code: &str, load: F) -> DirectoryResult<Dataset>
    where
        F: FnOnce() -> DirectoryResult<Vec<University>>,
    {
        if let Some(dataset) = self.get(code) {
            tracing::debug!("Cache hit for {code}");
            return Ok(dataset);
        }

        let loaded = Arc::new(load()?);

        let mut datasets = self.datasets.write().unwrap_or_else(|e| e.into_inner());
        let dataset = datasets
            .entry(code.to_string())
            .or_insert(loaded)
            .clone();
        Ok(dataset)
    }

    /// Number of cached countries.
    pub fn len(&self) -> usize {
        self.datasets.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Codes currently cached, sorted.
    pub fn cached_codes(&self) -> Vec<String> {
        let datasets = self.datasets.read().unwrap_or_else(|e| e.into_inner());
        let mut codes: Vec<String> = datasets.keys().cloned().collect();
        codes.sort();
        codes
    }
}
