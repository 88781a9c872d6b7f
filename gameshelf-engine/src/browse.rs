//! Interactive browse session: criteria, sort order, and the page cursor.
//!
//! [`Browser`] is the stateful caller the pure pipeline functions expect:
//! it owns the entry collection, the current [`Criteria`] and [`SortKey`],
//! and the 1-based page cursor, and re-runs filter → sort → clamp after
//! every mutation. A criteria change resets the cursor to page 1; a pure
//! sort-order change keeps it (and clamps, which never moves it since the
//! match count is unchanged).

use chrono::Utc;
use log::debug;

use gameshelf_catalog::GameEntry;

use crate::criteria::{Criteria, CriteriaChange};
use crate::filter::filter_entries_at;
use crate::page::{PAGE_SIZE, page_count, paginate};
use crate::sort::{SortKey, sort_entries};

/// A browse session over a fixed catalog collection.
pub struct Browser {
    entries: Vec<GameEntry>,
    criteria: Criteria,
    sort: SortKey,
    page: usize,
    page_size: usize,
    /// Filtered subsequence in collection order; sorting ties break
    /// against this order.
    filtered: Vec<GameEntry>,
    /// `filtered` under the current sort key.
    view: Vec<GameEntry>,
}

impl Browser {
    /// Start a session with the default page size and no active facets.
    pub fn new(entries: Vec<GameEntry>) -> Self {
        Self::with_page_size(entries, PAGE_SIZE)
    }

    /// Start a session with a custom page size.
    pub fn with_page_size(entries: Vec<GameEntry>, page_size: usize) -> Self {
        let mut browser = Self {
            entries,
            criteria: Criteria::default(),
            sort: SortKey::default(),
            page: 1,
            page_size,
            filtered: Vec::new(),
            view: Vec::new(),
        };
        browser.refilter();
        browser
    }

    /// Apply one criteria mutation. The filtered set is recomputed and the
    /// page cursor returns to 1.
    pub fn apply(&mut self, change: CriteriaChange) {
        self.criteria = self.criteria.apply(change);
        self.refilter();
        self.page = 1;
        debug!(
            "criteria changed: {} of {} entries match",
            self.view.len(),
            self.entries.len()
        );
    }

    /// Change the sort order. The filtered set and the page cursor are
    /// preserved.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.resort();
        debug!("sort order is now {key}");
    }

    /// Re-evaluate the filter against the current clock, keeping criteria,
    /// sort, and (clamped) page cursor. Relevant when relative release
    /// windows age out of date.
    pub fn refresh(&mut self) {
        self.refilter();
    }

    /// Jump to a page, clamped into `[1, max(1, page_count)]`.
    pub fn goto_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    /// Advance one page; a no-op at the last page.
    pub fn next_page(&mut self) {
        if self.page < self.page_count() {
            self.page += 1;
        }
    }

    /// Go back one page; a no-op at page 1.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// The entries on the current page.
    pub fn page_entries(&self) -> Vec<GameEntry> {
        paginate(&self.view, self.page, self.page_size)
    }

    /// The whole filtered, sorted result.
    pub fn matches(&self) -> &[GameEntry] {
        &self.view
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        page_count(self.view.len(), self.page_size)
    }

    /// Number of entries matching the current criteria.
    pub fn match_count(&self) -> usize {
        self.view.len()
    }

    /// Total number of entries in the catalog, ignoring criteria.
    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    fn refilter(&mut self) {
        self.filtered = filter_entries_at(&self.entries, &self.criteria, Utc::now());
        self.resort();
    }

    fn resort(&mut self) {
        self.view = sort_entries(&self.filtered, self.sort);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count().max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::DownloadBucket;

    fn games(count: usize) -> Vec<GameEntry> {
        (0..count)
            .map(|i| GameEntry {
                id: format!("g{i}"),
                title: format!("Game {i}"),
                downloads: if i % 2 == 0 { 2000 } else { 10 },
                views: i as u64,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_criteria_change_resets_page() {
        let mut browser = Browser::with_page_size(games(20), 6);
        browser.goto_page(3);
        assert_eq!(browser.page(), 3);

        browser.apply(CriteriaChange::Downloads(Some(DownloadBucket::AtLeast1000)));
        assert_eq!(browser.page(), 1);
        assert_eq!(browser.match_count(), 10);
    }

    #[test]
    fn test_sort_change_preserves_page() {
        let mut browser = Browser::with_page_size(games(20), 6);
        browser.goto_page(2);
        browser.set_sort(SortKey::MostViewed);
        assert_eq!(browser.page(), 2);
        assert_eq!(browser.match_count(), 20);
    }

    #[test]
    fn test_goto_page_clamps_both_ends() {
        let mut browser = Browser::with_page_size(games(13), 6);
        assert_eq!(browser.page_count(), 3);

        browser.goto_page(99);
        assert_eq!(browser.page(), 3);
        browser.goto_page(0);
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_navigation_noops_at_bounds() {
        let mut browser = Browser::with_page_size(games(7), 6);
        assert_eq!(browser.page_count(), 2);

        browser.prev_page();
        assert_eq!(browser.page(), 1);

        browser.next_page();
        assert_eq!(browser.page(), 2);
        browser.next_page();
        assert_eq!(browser.page(), 2);
    }

    #[test]
    fn test_empty_match_keeps_cursor_at_one() {
        let mut browser = Browser::with_page_size(games(20), 6);
        browser.apply(CriteriaChange::Keyword("no such game".into()));
        assert_eq!(browser.match_count(), 0);
        assert_eq!(browser.page_count(), 0);
        assert_eq!(browser.page(), 1);
        assert!(browser.page_entries().is_empty());
    }

    #[test]
    fn test_page_entries_window() {
        let mut browser = Browser::with_page_size(games(7), 6);
        assert_eq!(browser.page_entries().len(), 6);
        browser.next_page();
        assert_eq!(browser.page_entries().len(), 1);
    }
}
