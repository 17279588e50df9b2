//! Configuration loading and resolution.
//!
//! Every setting resolves as: explicit flag, then environment variable,
//! then a working-directory default.

use std::path::PathBuf;

use uni_directory::{CountryCatalog, UniversityDirectory};

use crate::types::ApiResult;

/// Environment variable naming the dataset directory.
pub const DATA_DIR_ENV: &str = "UNI_DATA_DIR";

/// Environment variable naming a JSON country catalog.
pub const CATALOG_ENV: &str = "UNI_CATALOG";

/// Dataset directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "University_data";

/// Resolve the dataset directory.
pub fn resolve_data_dir(explicit: Option<&str>) -> PathBuf {
    resolve_data_dir_with(explicit, std::env::var(DATA_DIR_ENV).ok())
}

fn resolve_data_dir_with(explicit: Option<&str>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Some(env_path) = env_value.filter(|v| !v.is_empty()) {
        return PathBuf::from(env_path);
    }

    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Resolve the catalog file, if one is configured.
pub fn resolve_catalog_path(explicit: Option<&str>) -> Option<PathBuf> {
    resolve_catalog_path_with(explicit, std::env::var(CATALOG_ENV).ok())
}

fn resolve_catalog_path_with(explicit: Option<&str>, env_value: Option<String>) -> Option<PathBuf> {
    explicit
        .map(PathBuf::from)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

/// Load the country catalog, falling back to the built-in table.
pub fn load_catalog(explicit: Option<&str>) -> ApiResult<CountryCatalog> {
    match resolve_catalog_path(explicit) {
        Some(path) => {
            tracing::info!("Loading country catalog from {}", path.display());
            Ok(CountryCatalog::from_file(&path)?)
        }
        None => Ok(CountryCatalog::builtin()),
    }
}

/// Build a directory from resolved configuration.
pub fn open_directory(
    data_dir: Option<&str>,
    catalog: Option<&str>,
) -> ApiResult<UniversityDirectory> {
    let data_dir = resolve_data_dir(data_dir);
    let catalog = load_catalog(catalog)?;

    tracing::info!(
        "Directory: {} ({} countries)",
        data_dir.display(),
        catalog.len()
    );

    Ok(UniversityDirectory::new(data_dir, catalog))
}
