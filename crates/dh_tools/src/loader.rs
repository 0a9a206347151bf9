//! RON data loading.
//!
//! A data directory holds one optional `rules.ron` with a [`RulesConfig`]
//! and any number of other `*.ron` files, each an [`EquipmentCatalog`]
//! fragment. Fragments are merged in file-name order.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use dh_core::config::RulesConfig;
use dh_core::data::EquipmentCatalog;
use dh_core::error::RulesError;

/// File name of the rules configuration inside a data directory.
pub const RULES_FILE: &str = "rules.ron";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DH_DATA_DIR";

/// Errors that can occur while loading data files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataLoadError {
    /// Failed to read a file or directory.
    #[error("IO error reading '{path}': {message}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// File content was rejected by the rules core.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Directory not found.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

}

/// Everything loaded from a data directory.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    /// Merged equipment catalog.
    pub catalog: EquipmentCatalog,
    /// Rules configuration (default if the directory has none).
    pub config: RulesConfig,
    /// Files that were read, in load order.
    pub files: Vec<PathBuf>,
}

fn read_file(path: &Path) -> Result<String, DataLoadError> {
    fs::read_to_string(path).map_err(|e| DataLoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load an equipment catalog from a RON file.
pub fn load_catalog_file(path: &Path) -> Result<EquipmentCatalog, DataLoadError> {
    let text = read_file(path)?;
    let catalog = EquipmentCatalog::from_ron_str(&text, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        armor = catalog.armor.len(),
        weapons = catalog.weapons.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Load a rules configuration from a RON file.
pub fn load_config_file(path: &Path) -> Result<RulesConfig, DataLoadError> {
    let text = read_file(path)?;
    Ok(RulesConfig::from_ron_str(&text, &path.display().to_string())?)
}

/// List the `*.ron` files in a directory, sorted by name.
pub fn ron_files(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    if !dir.is_dir() {
        return Err(DataLoadError::DirectoryNotFound(dir.display().to_string()));
    }

    let io_err = |e: std::io::Error| DataLoadError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Whether a path is the rules configuration file.
pub fn is_rules_file(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == RULES_FILE)
}

/// Load and merge every data file in a directory.
///
/// Stops at the first file that fails to load; use
/// [`crate::validate::validate_data_directory`] to collect every problem.
pub fn load_data_directory(dir: &Path) -> Result<DataSet, DataLoadError> {
    let mut data = DataSet::default();

    for path in ron_files(dir)? {
        if is_rules_file(&path) {
            data.config = load_config_file(&path)?;
        } else {
            let fragment = load_catalog_file(&path)?;
            data.catalog.armor.extend(fragment.armor);
            data.catalog.weapons.extend(fragment.weapons);
        }
        data.files.push(path);
    }

    tracing::info!(
        files = data.files.len(),
        armor = data.catalog.armor.len(),
        weapons = data.catalog.weapons.len(),
        "Loaded data directory {}",
        dir.display()
    );
    Ok(data)
}

/// Load a catalog from either a single file or a data directory.
pub fn load_catalog(path: &Path) -> Result<EquipmentCatalog, DataLoadError> {
    if path.is_dir() {
        Ok(load_data_directory(path)?.catalog)
    } else {
        load_catalog_file(path)
    }
}

/// Resolve the default data directory.
///
/// Checks, in order:
/// 1. Environment variable `DH_DATA_DIR`
/// 2. `./assets/data` (repo root)
/// 3. `../../assets/data` (running from a crate directory)
pub fn default_data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            return Some(path);
        }
        tracing::warn!("{DATA_DIR_ENV} points at missing directory {}", path.display());
    }

    ["assets/data", "../../assets/data"]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_dir())
}
