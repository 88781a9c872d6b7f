//! Shared CLI settings (catalog directory location).
//!
//! The settings file is `~/.config/gameshelf/settings.toml`; catalog-path
//! resolution is consistent across invocations so `gameshelf browse` works
//! from anywhere once a catalog directory has been saved.

use std::io;
use std::path::{Path, PathBuf};

/// Canonical path to the settings file: `~/.config/gameshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gameshelf").join("settings.toml")
}

/// Resolve the catalog directory using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `catalog.current_dir` in `settings.toml`
/// 3. `./catalog`
pub fn resolve_catalog_dir(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_catalog_dir() {
        return p;
    }
    PathBuf::from("catalog")
}

/// Read `catalog.current_dir` from `settings.toml`, if set.
fn load_catalog_dir() -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let dir = doc.get("catalog")?.get("current_dir")?.as_str()?;
    if dir.is_empty() {
        None
    } else {
        Some(PathBuf::from(dir))
    }
}

/// Save (or clear) the catalog directory in `settings.toml`.
///
/// Uses `toml::Value` for a surgical update so unrelated settings are
/// preserved.
pub fn save_catalog_dir(path: Option<&Path>) -> io::Result<()> {
    let settings = settings_path();
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(&settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let catalog = table
        .entry("catalog")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let catalog_table = catalog
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[catalog] is not a table"))?;

    match path {
        Some(p) => {
            catalog_table.insert(
                "current_dir".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            catalog_table.remove("current_dir");
        }
    }

    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, &settings)?;

    Ok(())
}
