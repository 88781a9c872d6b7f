//! YAML loading for catalog data.
//!
//! A catalog directory holds one `.yaml` file per game entry. Files are
//! loaded in name order so the collection order is deterministic; the
//! browse engine treats that order as the tie-break order for sorting.

use crate::types::GameEntry;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// Load a single game entry from a YAML file.
pub fn load_entry(path: &Path) -> Result<GameEntry, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load all game entries from YAML files in a directory.
///
/// Each `.yaml`/`.yml` file in the directory should contain a single
/// `GameEntry`. A missing directory yields an empty catalog.
pub fn load_entries(dir: &Path) -> Result<Vec<GameEntry>, CatalogError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(CatalogError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| CatalogError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut games = Vec::with_capacity(entries.len());
    for entry in entries {
        games.push(load_entry(&entry.path())?);
    }

    Ok(games)
}
