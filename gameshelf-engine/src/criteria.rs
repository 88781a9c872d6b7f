//! Filter criteria and the pure reducers that mutate them.
//!
//! A [`Criteria`] value holds one field per facet. Every facet is
//! independently togglable; an empty or absent facet imposes no constraint.
//! Mutation goes through [`Criteria::apply`], which takes the current value
//! and a [`CriteriaChange`] and returns the next value, so there is no
//! hidden shared state between the criteria and the view that consumes them.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};
use gameshelf_catalog::GameMode;

// ── Download bucket ─────────────────────────────────────────────────────────

/// Coarse download-count ranges for filtering. The three buckets are
/// disjoint and cover all counts; at most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadBucket {
    /// 1000 downloads or more.
    AtLeast1000,
    /// 500 to 999 downloads, both ends inclusive.
    From500To999,
    /// Fewer than 500 downloads.
    Under500,
}

impl DownloadBucket {
    /// Whether a download count falls inside this bucket.
    pub fn contains(self, downloads: u64) -> bool {
        match self {
            Self::AtLeast1000 => downloads >= 1000,
            Self::From500To999 => (500..=999).contains(&downloads),
            Self::Under500 => downloads < 500,
        }
    }

    /// Label used for CLI arguments and display.
    pub fn label(self) -> &'static str {
        match self {
            Self::AtLeast1000 => "1000+",
            Self::From500To999 => "500-999",
            Self::Under500 => "under-500",
        }
    }
}

impl std::fmt::Display for DownloadBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when a string cannot be parsed into a `DownloadBucket`.
#[derive(Debug, Clone)]
pub struct DownloadBucketParseError(pub String);

impl std::fmt::Display for DownloadBucketParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown download bucket: '{}' (try 1000+, 500-999, under-500)", self.0)
    }
}

impl std::error::Error for DownloadBucketParseError {}

impl std::str::FromStr for DownloadBucket {
    type Err = DownloadBucketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1000+" | ">=1000" => Ok(Self::AtLeast1000),
            "500-999" => Ok(Self::From500To999),
            "under-500" | "under500" | "<500" => Ok(Self::Under500),
            _ => Err(DownloadBucketParseError(s.to_string())),
        }
    }
}

// ── Release window ──────────────────────────────────────────────────────────

/// When a game was released.
///
/// The relative windows are evaluated against the clock passed to the
/// filter pipeline: lower bound inclusive, no upper bound. The explicit
/// range is inclusive at both ends; a start after its end matches nothing,
/// which is a valid (empty) selection rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseWindow {
    Last7Days,
    Last30Days,
    LastYear,
    Between {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl ReleaseWindow {
    /// Whether a release timestamp falls inside this window, with `now`
    /// as the evaluation clock for the relative variants.
    pub fn contains(&self, released: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match *self {
            Self::Last7Days => released >= now - Duration::days(7),
            Self::Last30Days => released >= now - Duration::days(30),
            Self::LastYear => released >= now - Duration::days(365),
            Self::Between { start, end } => released >= start && released <= end,
        }
    }
}

/// Error returned when a string cannot be parsed into a `ReleaseWindow`.
#[derive(Debug, Clone)]
pub struct ReleaseWindowParseError(pub String);

impl std::fmt::Display for ReleaseWindowParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid release window: '{}' (try 7d, 30d, 1y, or YYYY-MM-DD..YYYY-MM-DD)",
            self.0
        )
    }
}

impl std::error::Error for ReleaseWindowParseError {}

impl std::str::FromStr for ReleaseWindow {
    type Err = ReleaseWindowParseError;

    /// Parse a window from a CLI-style string: `7d`, `30d`, `1y`, or an
    /// explicit `YYYY-MM-DD..YYYY-MM-DD` range. Explicit ranges cover the
    /// whole of both named days.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "7d" | "week" => return Ok(Self::Last7Days),
            "30d" | "month" => return Ok(Self::Last30Days),
            "1y" | "year" => return Ok(Self::LastYear),
            _ => {}
        }

        let err = || ReleaseWindowParseError(s.to_string());
        let (start_str, end_str) = s.split_once("..").ok_or_else(err)?;
        let start_day = NaiveDate::parse_from_str(start_str, "%Y-%m-%d").map_err(|_| err())?;
        let end_day = NaiveDate::parse_from_str(end_str, "%Y-%m-%d").map_err(|_| err())?;

        // End of day: midnight of the following day, minus one second.
        let end_next = end_day.checked_add_days(Days::new(1)).ok_or_else(err)?;
        Ok(Self::Between {
            start: start_day.and_time(NaiveTime::MIN).and_utc(),
            end: end_next.and_time(NaiveTime::MIN).and_utc() - Duration::seconds(1),
        })
    }
}

// ── Criteria ────────────────────────────────────────────────────────────────

/// The full set of active facet selections.
///
/// The overall predicate over an entry is always the logical AND of the
/// non-empty facets; see `filter` for the per-facet contracts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    /// Case-insensitive substring matched against title or description.
    pub keyword: String,
    /// Selected genre category ids; a game must carry every one.
    pub genres: BTreeSet<String>,
    /// Selected engine category ids; a game must carry every one.
    pub engines: BTreeSet<String>,
    /// Selected tags; a game must carry every one.
    pub tags: BTreeSet<String>,
    /// Minimum average rating, inclusive.
    pub min_rating: Option<f64>,
    /// Minimum number of ratings, inclusive.
    pub min_rating_count: Option<u32>,
    pub downloads: Option<DownloadBucket>,
    /// Selected game modes; a game must support at least one.
    pub modes: BTreeSet<GameMode>,
    pub release_window: Option<ReleaseWindow>,
    /// Case-insensitive substring matched against the uploader name.
    pub uploader: String,
}

/// A single facet mutation, applied through [`Criteria::apply`].
#[derive(Debug, Clone)]
pub enum CriteriaChange {
    Keyword(String),
    AddGenre(String),
    RemoveGenre(String),
    ClearGenres,
    AddEngine(String),
    RemoveEngine(String),
    ClearEngines,
    /// Replace the tag facet wholesale from a comma-separated string.
    Tags(String),
    MinRating(Option<f64>),
    MinRatingCount(Option<u32>),
    Downloads(Option<DownloadBucket>),
    GameMode { mode: GameMode, enabled: bool },
    ReleaseWindow(Option<ReleaseWindow>),
    Uploader(String),
    /// Drop every facet at once.
    ClearAll,
}

impl Criteria {
    /// Whether no facet is active.
    pub fn is_empty(&self) -> bool {
        *self == Criteria::default()
    }

    /// Apply one mutation, producing the next criteria value.
    ///
    /// Set additions are idempotent; removing an absent element is a no-op.
    pub fn apply(&self, change: CriteriaChange) -> Criteria {
        let mut next = self.clone();
        match change {
            CriteriaChange::Keyword(s) => next.keyword = s,
            CriteriaChange::AddGenre(id) => {
                next.genres.insert(id);
            }
            CriteriaChange::RemoveGenre(id) => {
                next.genres.remove(&id);
            }
            CriteriaChange::ClearGenres => next.genres.clear(),
            CriteriaChange::AddEngine(id) => {
                next.engines.insert(id);
            }
            CriteriaChange::RemoveEngine(id) => {
                next.engines.remove(&id);
            }
            CriteriaChange::ClearEngines => next.engines.clear(),
            CriteriaChange::Tags(csv) => next.tags = parse_tag_list(&csv),
            CriteriaChange::MinRating(min) => next.min_rating = min,
            CriteriaChange::MinRatingCount(min) => next.min_rating_count = min,
            CriteriaChange::Downloads(bucket) => next.downloads = bucket,
            CriteriaChange::GameMode { mode, enabled } => {
                if enabled {
                    next.modes.insert(mode);
                } else {
                    next.modes.remove(&mode);
                }
            }
            CriteriaChange::ReleaseWindow(window) => next.release_window = window,
            CriteriaChange::Uploader(s) => next.uploader = s,
            CriteriaChange::ClearAll => next = Criteria::default(),
        }
        next
    }
}

/// Parse a comma-separated tag string into a trimmed set, dropping empties.
pub fn parse_tag_list(csv: &str) -> BTreeSet<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_list_trims_and_drops_empties() {
        let tags = parse_tag_list(" tactics, pixel-art , ,roguelike,");
        let expected: BTreeSet<String> = ["tactics", "pixel-art", "roguelike"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tags, expected);

        assert!(parse_tag_list("").is_empty());
        assert!(parse_tag_list(" , ,").is_empty());
    }

    #[test]
    fn test_add_genre_is_idempotent() {
        let c = Criteria::default()
            .apply(CriteriaChange::AddGenre("rpg".into()))
            .apply(CriteriaChange::AddGenre("rpg".into()));
        assert_eq!(c.genres.len(), 1);
    }

    #[test]
    fn test_remove_absent_genre_is_noop() {
        let c = Criteria::default().apply(CriteriaChange::RemoveGenre("rpg".into()));
        assert!(c.genres.is_empty());
        assert!(c.is_empty());
    }

    #[test]
    fn test_tags_change_replaces_wholesale() {
        let c = Criteria::default()
            .apply(CriteriaChange::Tags("a,b".into()))
            .apply(CriteriaChange::Tags("c".into()));
        assert_eq!(c.tags.len(), 1);
        assert!(c.tags.contains("c"));
    }

    #[test]
    fn test_mode_toggle() {
        let c = Criteria::default().apply(CriteriaChange::GameMode {
            mode: GameMode::Coop,
            enabled: true,
        });
        assert!(c.modes.contains(&GameMode::Coop));

        let c = c.apply(CriteriaChange::GameMode {
            mode: GameMode::Coop,
            enabled: false,
        });
        assert!(c.modes.is_empty());
    }

    #[test]
    fn test_clear_all_resets_every_facet() {
        let c = Criteria::default()
            .apply(CriteriaChange::Keyword("moon".into()))
            .apply(CriteriaChange::AddGenre("rpg".into()))
            .apply(CriteriaChange::MinRating(Some(4.0)))
            .apply(CriteriaChange::ClearAll);
        assert!(c.is_empty());
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let base = Criteria::default();
        let _ = base.apply(CriteriaChange::AddGenre("rpg".into()));
        assert!(base.is_empty());
    }

    #[test]
    fn test_bucket_ranges_are_disjoint_and_total() {
        for downloads in [0, 1, 499, 500, 999, 1000, 120_000] {
            let hits = [
                DownloadBucket::AtLeast1000,
                DownloadBucket::From500To999,
                DownloadBucket::Under500,
            ]
            .iter()
            .filter(|b| b.contains(downloads))
            .count();
            assert_eq!(hits, 1, "downloads={downloads}");
        }
    }

    #[test]
    fn test_window_parse() {
        assert_eq!("7d".parse::<ReleaseWindow>().unwrap(), ReleaseWindow::Last7Days);
        assert_eq!("month".parse::<ReleaseWindow>().unwrap(), ReleaseWindow::Last30Days);

        let window = "2024-01-01..2024-01-31".parse::<ReleaseWindow>().unwrap();
        let ReleaseWindow::Between { start, end } = window else {
            panic!("expected explicit range");
        };
        assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-01-31T23:59:59+00:00");

        assert!("yesterday".parse::<ReleaseWindow>().is_err());
        assert!("2024-01-01..".parse::<ReleaseWindow>().is_err());
    }
}
