//! The filter pipeline: per-facet predicates and their conjunction.
//!
//! Each active facet contributes one predicate, tagged with the [`Facet`]
//! it implements; an entry survives the pipeline iff every active predicate
//! accepts it. Whether a facet matches ALL of its selections (genres,
//! engines, tags) or ANY of them (game modes) is a property of that facet's
//! predicate, not of the combinator.
//!
//! The pipeline preserves collection order and never reorders; ordering is
//! the `sort` module's job.

use chrono::{DateTime, Utc};
use gameshelf_catalog::{CategoryKind, GameEntry, GameMode};
use std::collections::BTreeSet;

use crate::criteria::{Criteria, DownloadBucket, ReleaseWindow};

/// One independently togglable filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Keyword,
    Genres,
    Engines,
    Tags,
    MinRating,
    MinRatingCount,
    Downloads,
    GameModes,
    ReleaseWindow,
    Uploader,
}

/// A facet's predicate over a single entry.
pub struct FacetPredicate<'c> {
    facet: Facet,
    test: Box<dyn Fn(&GameEntry) -> bool + 'c>,
}

impl<'c> FacetPredicate<'c> {
    fn new(facet: Facet, test: impl Fn(&GameEntry) -> bool + 'c) -> Self {
        Self {
            facet,
            test: Box::new(test),
        }
    }

    /// The facet this predicate implements.
    pub fn facet(&self) -> Facet {
        self.facet
    }

    /// Whether the entry passes this facet.
    pub fn matches(&self, entry: &GameEntry) -> bool {
        (self.test)(entry)
    }
}

/// Build the predicate registry for every non-empty facet of `criteria`.
///
/// `now` is the evaluation clock for relative release windows.
pub fn active_predicates<'c>(
    criteria: &'c Criteria,
    now: DateTime<Utc>,
) -> Vec<FacetPredicate<'c>> {
    let mut predicates = Vec::new();

    if !criteria.keyword.is_empty() {
        predicates.push(FacetPredicate::new(Facet::Keyword, move |entry| {
            keyword_matches(entry, &criteria.keyword)
        }));
    }
    if !criteria.genres.is_empty() {
        predicates.push(FacetPredicate::new(Facet::Genres, move |entry| {
            has_all_categories(entry, CategoryKind::Genre, &criteria.genres)
        }));
    }
    if !criteria.engines.is_empty() {
        predicates.push(FacetPredicate::new(Facet::Engines, move |entry| {
            has_all_categories(entry, CategoryKind::Engine, &criteria.engines)
        }));
    }
    if !criteria.tags.is_empty() {
        predicates.push(FacetPredicate::new(Facet::Tags, move |entry| {
            has_all_tags(entry, &criteria.tags)
        }));
    }
    if let Some(min) = criteria.min_rating {
        predicates.push(FacetPredicate::new(Facet::MinRating, move |entry| {
            entry.avg_rating >= min
        }));
    }
    if let Some(min) = criteria.min_rating_count {
        predicates.push(FacetPredicate::new(Facet::MinRatingCount, move |entry| {
            entry.rating_count >= min
        }));
    }
    if let Some(bucket) = criteria.downloads {
        predicates.push(FacetPredicate::new(Facet::Downloads, move |entry| {
            in_download_bucket(entry, bucket)
        }));
    }
    if !criteria.modes.is_empty() {
        predicates.push(FacetPredicate::new(Facet::GameModes, move |entry| {
            supports_any_mode(entry, &criteria.modes)
        }));
    }
    if let Some(window) = criteria.release_window {
        predicates.push(FacetPredicate::new(Facet::ReleaseWindow, move |entry| {
            in_release_window(entry, window, now)
        }));
    }
    if !criteria.uploader.is_empty() {
        predicates.push(FacetPredicate::new(Facet::Uploader, move |entry| {
            uploader_matches(entry, &criteria.uploader)
        }));
    }

    predicates
}

/// Filter a collection against the active facets, preserving collection
/// order. An empty result is a valid outcome, never an error.
///
/// `now` is the evaluation clock for relative release windows.
pub fn filter_entries_at(
    entries: &[GameEntry],
    criteria: &Criteria,
    now: DateTime<Utc>,
) -> Vec<GameEntry> {
    let predicates = active_predicates(criteria, now);
    entries
        .iter()
        .filter(|entry| predicates.iter().all(|p| p.matches(entry)))
        .cloned()
        .collect()
}

/// [`filter_entries_at`] with the current time as the evaluation clock.
pub fn filter_entries(entries: &[GameEntry], criteria: &Criteria) -> Vec<GameEntry> {
    filter_entries_at(entries, criteria, Utc::now())
}

// ── Facet predicates ────────────────────────────────────────────────────────

/// Case-insensitive substring match against title or description.
fn keyword_matches(entry: &GameEntry, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    entry.title.to_lowercase().contains(&needle)
        || entry.description.to_lowercase().contains(&needle)
}

/// ALL-of: the entry must carry every selected category id of this kind.
fn has_all_categories(entry: &GameEntry, kind: CategoryKind, ids: &BTreeSet<String>) -> bool {
    ids.iter().all(|id| entry.has_category(kind, id))
}

/// ALL-of: the entry must carry every selected tag.
fn has_all_tags(entry: &GameEntry, tags: &BTreeSet<String>) -> bool {
    tags.iter().all(|tag| entry.has_tag(tag))
}

fn in_download_bucket(entry: &GameEntry, bucket: DownloadBucket) -> bool {
    bucket.contains(entry.downloads)
}

/// ANY-of: the entry's modes must intersect the selection. This is the one
/// OR facet.
fn supports_any_mode(entry: &GameEntry, modes: &BTreeSet<GameMode>) -> bool {
    entry.modes.iter().any(|mode| modes.contains(mode))
}

fn in_release_window(entry: &GameEntry, window: ReleaseWindow, now: DateTime<Utc>) -> bool {
    window.contains(entry.released_at, now)
}

/// Case-insensitive substring match against the uploader display name.
fn uploader_matches(entry: &GameEntry, uploader: &str) -> bool {
    entry
        .uploader
        .name
        .to_lowercase()
        .contains(&uploader.to_lowercase())
}
