//! Shared-game catalog data model and YAML I/O.
//!
//! This crate defines the catalog types for a game-sharing site without any
//! engine or UI dependencies. Consumers can use the types directly for
//! serialization or display, or hand a loaded collection to
//! `gameshelf-engine` for faceted browsing.

pub mod types;
pub mod yaml;

pub use types::{Category, CategoryKind, GameEntry, GameMode, GameModeParseError, Uploader};
pub use yaml::{CatalogError, load_entries, load_entry};
