//! Page-window arithmetic over a sorted result.

use gameshelf_catalog::GameEntry;

/// Number of entries shown per page.
pub const PAGE_SIZE: usize = 6;

/// Number of pages needed for `total` entries. Zero entries need zero
/// pages; a zero page size yields zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The 1-based `page` window of a collection: the half-open slice
/// `[(page - 1) * page_size, page * page_size)`.
///
/// An out-of-range page (including page 0) yields an empty vector, never
/// an error.
pub fn paginate(entries: &[GameEntry], page: usize, page_size: usize) -> Vec<GameEntry> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return Vec::new();
    };
    if start >= entries.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(entries.len());
    entries[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(count: usize) -> Vec<GameEntry> {
        (0..count)
            .map(|i| GameEntry {
                id: format!("g{i}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 6), 0);
        assert_eq!(page_count(1, 6), 1);
        assert_eq!(page_count(6, 6), 1);
        assert_eq!(page_count(7, 6), 2);
        assert_eq!(page_count(12, 6), 2);
        assert_eq!(page_count(13, 6), 3);
    }

    #[test]
    fn test_last_partial_page() {
        // Scenario C: 7 entries, page size 6, page 2 is exactly the 7th.
        let entries = games(7);
        let page = paginate(&entries, 2, 6);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, "g6");
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let entries = games(7);
        assert!(paginate(&entries, 3, 6).is_empty());
        assert!(paginate(&entries, 99, 6).is_empty());
        assert!(paginate(&entries, 0, 6).is_empty());
        assert!(paginate(&[], 1, 6).is_empty());
    }

    #[test]
    fn test_pages_cover_the_collection_without_gaps_or_overlap() {
        let entries = games(20);
        let size = 6;
        let mut rebuilt = Vec::new();
        for page in 1..=page_count(entries.len(), size) {
            rebuilt.extend(paginate(&entries, page, size));
        }
        let original: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        let rebuilt: Vec<_> = rebuilt.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(rebuilt, original);
    }
}
