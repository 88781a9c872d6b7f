//! Total orders over the filtered result.
//!
//! Every sort is descending by its key and stable: entries with equal keys
//! keep their relative order from the input, which for a freshly filtered
//! collection is the original collection order.

use std::cmp::Ordering;

use gameshelf_catalog::GameEntry;

/// The selected total-order strategy for the filtered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest release first. The default.
    #[default]
    MostRecent,
    MostViewed,
    MostDownloaded,
    HighestRated,
    /// Highest derived success percentage first. Entries without a
    /// computed success rate sort below every entry that has one.
    SuccessRate,
}

/// All sort keys in display order.
const ALL_KEYS: &[SortKey] = &[
    SortKey::MostRecent,
    SortKey::MostViewed,
    SortKey::MostDownloaded,
    SortKey::HighestRated,
    SortKey::SuccessRate,
];

impl SortKey {
    /// Canonical short name used for CLI arguments.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::MostRecent => "recent",
            Self::MostViewed => "viewed",
            Self::MostDownloaded => "downloaded",
            Self::HighestRated => "rated",
            Self::SuccessRate => "success",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MostRecent => "Most recent",
            Self::MostViewed => "Most viewed",
            Self::MostDownloaded => "Most downloaded",
            Self::HighestRated => "Highest rated",
            Self::SuccessRate => "Success rate",
        }
    }

    /// All sort key variants.
    pub fn all() -> &'static [SortKey] {
        ALL_KEYS
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `SortKey`.
#[derive(Debug, Clone)]
pub struct SortKeyParseError(pub String);

impl std::fmt::Display for SortKeyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sort key: '{}'", self.0)
    }
}

impl std::error::Error for SortKeyParseError {}

impl std::str::FromStr for SortKey {
    type Err = SortKeyParseError;

    /// Parse a sort key from its short name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        for &key in ALL_KEYS {
            if key.short_name() == lower {
                return Ok(key);
            }
        }
        Err(SortKeyParseError(s.to_string()))
    }
}

/// Sort a collection under the given key without mutating the input.
///
/// The sort is stable; ties keep the input order.
pub fn sort_entries(entries: &[GameEntry], key: SortKey) -> Vec<GameEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

/// Descending comparison of two entries under the given key.
fn compare(a: &GameEntry, b: &GameEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::MostRecent => b.released_at.cmp(&a.released_at),
        SortKey::MostViewed => b.views.cmp(&a.views),
        SortKey::MostDownloaded => b.downloads.cmp(&a.downloads),
        SortKey::HighestRated => b.avg_rating.total_cmp(&a.avg_rating),
        SortKey::SuccessRate => success_rank(b).total_cmp(&success_rank(a)),
    }
}

/// Success rate with the documented missing-value fallback: an absent rate
/// ranks below every present value.
fn success_rank(entry: &GameEntry) -> f64 {
    entry.success_rate.unwrap_or(f64::NEG_INFINITY)
}
