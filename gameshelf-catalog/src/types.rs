//! Data model types for the shared-game catalog.
//!
//! These types represent a game entry as published on the sharing site:
//! identity, categories, tags, play statistics, and uploader. The browse
//! engine in `gameshelf-engine` only ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────────────

/// What a category classifies a game by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Gameplay genre (RPG, adventure, puzzle, ...).
    Genre,
    /// Engine or toolkit the game was built with.
    Engine,
}

/// A browsable category a game is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
}

// ── Game mode ───────────────────────────────────────────────────────────────

/// How a game is played. Fixed vocabulary; a game may support several.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    SinglePlayer,
    Multiplayer,
    Coop,
    Pvp,
}

/// All game mode variants in declaration order.
const ALL_MODES: &[GameMode] = &[
    GameMode::SinglePlayer,
    GameMode::Multiplayer,
    GameMode::Coop,
    GameMode::Pvp,
];

impl GameMode {
    /// Canonical short name used for CLI arguments and identifiers.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::SinglePlayer => "single-player",
            Self::Multiplayer => "multiplayer",
            Self::Coop => "coop",
            Self::Pvp => "pvp",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SinglePlayer => "Single player",
            Self::Multiplayer => "Multiplayer",
            Self::Coop => "Co-op",
            Self::Pvp => "PvP",
        }
    }

    /// All accepted names for this mode (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::SinglePlayer => &["single-player", "singleplayer", "single", "sp"],
            Self::Multiplayer => &["multiplayer", "multi", "mp"],
            Self::Coop => &["coop", "co-op"],
            Self::Pvp => &["pvp", "versus", "vs"],
        }
    }

    /// All mode variants.
    pub fn all() -> &'static [GameMode] {
        ALL_MODES
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `GameMode`.
#[derive(Debug, Clone)]
pub struct GameModeParseError(pub String);

impl std::fmt::Display for GameModeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown game mode: '{}'", self.0)
    }
}

impl std::error::Error for GameModeParseError {}

impl std::str::FromStr for GameMode {
    type Err = GameModeParseError;

    /// Parse a mode from any recognized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        for &mode in ALL_MODES {
            if mode.aliases().contains(&lower.as_str()) {
                return Ok(mode);
            }
        }
        Err(GameModeParseError(s.to_string()))
    }
}

// ── Uploader ────────────────────────────────────────────────────────────────

/// The account that published a game entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub id: String,
    pub name: String,
}

// ── Game entry ──────────────────────────────────────────────────────────────

/// A shared game entry as published on the site.
///
/// `success_rate` is a derived percentage (players who finished the game)
/// and is not computed for entries without enough play data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Average user rating, 0 to 5.
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub views: u64,
    pub released_at: DateTime<Utc>,
    #[serde(default)]
    pub modes: Vec<GameMode>,
    #[serde(default)]
    pub new_release: bool,
    pub uploader: Uploader,
    #[serde(default)]
    pub success_rate: Option<f64>,
}

impl GameEntry {
    /// Iterate over the ids of this entry's categories of the given kind.
    pub fn category_ids(&self, kind: CategoryKind) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .filter(move |c| c.kind == kind)
            .map(|c| c.id.as_str())
    }

    /// Whether the entry carries a category of the given kind and id.
    pub fn has_category(&self, kind: CategoryKind, id: &str) -> bool {
        self.categories.iter().any(|c| c.kind == kind && c.id == id)
    }

    /// Whether the entry carries the given tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the entry supports the given mode.
    pub fn has_mode(&self, mode: GameMode) -> bool {
        self.modes.contains(&mode)
    }
}
