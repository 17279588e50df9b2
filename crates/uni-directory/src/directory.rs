//! University directory — dataset loading, country registry, search, and
//! identity lookup over one data directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{Dataset, DatasetCache};
use crate::catalog::CountryCatalog;
use crate::search::{filter_universities, SearchFilters};
use crate::storage::DatasetReader;
use crate::types::{CountrySummary, DirectoryError, DirectoryResult, University};

/// Read-only directory over the datasets named by a [`CountryCatalog`].
#[derive(Debug)]
pub struct UniversityDirectory {
    data_dir: PathBuf,
    catalog: CountryCatalog,
    cache: DatasetCache,
}

impl UniversityDirectory {
    pub fn new(data_dir: impl Into<PathBuf>, catalog: CountryCatalog) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog,
            cache: DatasetCache::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Records for `country`, loading and caching them on first use.
    ///
    /// Unknown countries and unreadable or malformed datasets both yield an
    /// empty list; load failures are logged.
    pub fn universities(&self, country: &str) -> Dataset {
        match self.try_universities(country) {
            Ok(dataset) => dataset,
            Err(DirectoryError::UnknownCountry(_)) => Arc::new(Vec::new()),
            Err(e) => {
                tracing::error!("Failed to load university data for {country}: {e}");
                Arc::new(Vec::new())
            }
        }
    }

    /// Like [`universities`](Self::universities) but reports why a dataset
    /// could not be produced.
    pub fn try_universities(&self, country: &str) -> DirectoryResult<Dataset> {
        let key = country.to_lowercase();
        let entry = self
            .catalog
            .get(&key)
            .ok_or_else(|| DirectoryError::UnknownCountry(key.clone()))?;
        let path = self.data_dir.join(&entry.file);

        self.cache.get_or_load(&key, || {
            let universities = DatasetReader::read_from_file(&path, &key)?;
            tracing::info!(
                "Loaded {} universities for {key} from {}",
                universities.len(),
                path.display()
            );
            Ok(universities)
        })
    }

    /// Every configured country's records, in catalog order.
    pub fn all_universities(&self) -> Vec<University> {
        self.catalog
            .codes()
            .flat_map(|code| self.universities(code).iter().cloned().collect::<Vec<_>>())
            .collect()
    }

    /// Registry view: every configured country with its loadable count.
    pub fn countries(&self) -> Vec<CountrySummary> {
        self.catalog
            .entries()
            .iter()
            .map(|entry| CountrySummary {
                code: entry.code.clone(),
                name: entry.display_name().to_string(),
                flag: entry.display_flag().to_string(),
                count: self.universities(&entry.code).len(),
            })
            .collect()
    }

    /// First record in `country` whose slug equals `slug`.
    pub fn find_by_slug(&self, country: &str, slug: &str) -> Option<University> {
        self.universities(country)
            .iter()
            .find(|u| u.slug == slug)
            .cloned()
    }

    /// Search one country, or all of them when `country` is `None`.
    pub fn search(
        &self,
        country: Option<&str>,
        query: &str,
        filters: &SearchFilters,
    ) -> Vec<University> {
        match country {
            Some(code) => filter_universities(&self.universities(code), query, filters),
            None => filter_universities(&self.all_universities(), query, filters),
        }
    }
}
