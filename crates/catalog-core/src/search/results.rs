//! Pagination state and page snapshots.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Page sizes offered to the shopper.
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 3] = [10, 50, 100];

/// Default page size.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Where the item total comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PageSource {
    /// Total is the length of the locally filtered list, which is sliced here.
    #[default]
    Client,
    /// Total is reported by a remotely paged source; the list held locally
    /// is already the current page and is shown as is.
    Server,
}

/// Number of pages needed for `total` items; zero when there are no items.
pub fn total_pages(total: usize, items_per_page: usize) -> usize {
    if total == 0 || items_per_page == 0 {
        0
    } else {
        total.div_ceil(items_per_page)
    }
}

/// Current page, page size and item total for one listing.
///
/// Only built through its setters, which keep `current_page >= 1` and the
/// page size within [`ITEMS_PER_PAGE_OPTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    current_page: usize,
    items_per_page: usize,
    total: usize,
    source: PageSource,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            total: 0,
            source: PageSource::Client,
        }
    }
}

impl PaginationState {
    /// Create pagination with one of the offered page sizes.
    pub fn new(items_per_page: usize) -> Result<Self, CatalogError> {
        validate_items_per_page(items_per_page)?;
        Ok(Self {
            items_per_page,
            ..Self::default()
        })
    }

    /// Current page (1-indexed).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn source(&self) -> PageSource {
        self.source
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.items_per_page)
    }

    /// Change the page size. Always returns to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<(), CatalogError> {
        validate_items_per_page(items_per_page)?;
        self.items_per_page = items_per_page;
        self.current_page = 1;
        Ok(())
    }

    /// Any filter change returns to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Take the total from a locally filtered list of `len` items.
    pub fn sync_client_total(&mut self, len: usize) {
        self.source = PageSource::Client;
        self.total = len;
        self.clamp();
    }

    /// Take the page and total reported by a remotely paged source.
    pub fn apply_server_meta(&mut self, page: usize, total: usize) {
        self.source = PageSource::Server;
        self.total = total;
        self.current_page = page.max(1);
        self.clamp();
    }

    /// Jump to `page`, clamped to the available pages.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page;
        self.clamp();
    }

    pub fn can_prev(&self) -> bool {
        self.total_pages() > 0 && self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.total_pages() > 0 && self.current_page < self.total_pages()
    }

    /// Go back one page. Returns `false` when the button is disabled.
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Go forward one page. Returns `false` when the button is disabled.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        self.current_page.saturating_sub(1) * self.items_per_page
    }

    /// The items to display for the current page.
    ///
    /// Client-side pages slice `[offset, offset + items_per_page)` clamped to
    /// the list; server-side pages already hold exactly one page.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.source {
            PageSource::Server => items,
            PageSource::Client => {
                let start = self.offset().min(items.len());
                let end = (start + self.items_per_page).min(items.len());
                &items[start..end]
            }
        }
    }

    /// Snapshot for rendering.
    pub fn info(&self) -> Pagination {
        Pagination::new(self.current_page, self.items_per_page, self.total)
    }

    fn clamp(&mut self) {
        let pages = self.total_pages();
        self.current_page = self.current_page.clamp(1, pages.max(1));
    }
}

fn validate_items_per_page(items_per_page: usize) -> Result<(), CatalogError> {
    if ITEMS_PER_PAGE_OPTIONS.contains(&items_per_page) {
        Ok(())
    } else {
        Err(CatalogError::InvalidItemsPerPage(items_per_page))
    }
}

/// Pagination info for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = total_pages(total, per_page);
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: total_pages > 0 && page < total_pages,
            has_prev: total_pages > 0 && page > 1,
        }
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }
}

/// "Showing X of Y" summary for the results header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub shown: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_zero_clamps_to_first_page() {
        let items: Vec<u32> = (0..25).collect();
        let mut state = PaginationState::new(10).unwrap();
        state.sync_client_total(items.len());
        state.go_to(0);

        assert_eq!(state.current_page(), 1);
        assert_eq!(state.offset(), 0);
        assert_eq!(state.page_slice(&items), &items[..10]);

        state.apply_server_meta(0, 25);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 100), 1);
    }

    #[test]
    fn test_last_page_and_next_noop() {
        let items: Vec<u32> = (0..25).collect();
        let mut state = PaginationState::new(10).unwrap();
        state.sync_client_total(items.len());
        assert_eq!(state.total_pages(), 3);

        assert!(state.next());
        assert!(state.next());
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.page_slice(&items).len(), 5);
        assert_eq!(state.page_slice(&items)[0], 20);

        assert!(!state.next());
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn test_prev_noop_on_first_page() {
        let mut state = PaginationState::new(10).unwrap();
        state.sync_client_total(25);
        assert!(!state.can_prev());
        assert!(!state.prev());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_no_pages_disables_navigation() {
        let mut state = PaginationState::new(10).unwrap();
        state.sync_client_total(0);
        assert_eq!(state.total_pages(), 0);
        assert!(!state.next());
        assert!(!state.prev());
        assert_eq!(state.current_page(), 1);
        assert!(state.page_slice::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_items_per_page_change_resets_page() {
        let mut state = PaginationState::new(10).unwrap();
        state.sync_client_total(95);
        state.go_to(7);
        assert_eq!(state.current_page(), 7);

        state.set_items_per_page(50).unwrap();
        assert_eq!(state.current_page(), 1);
        assert!(state.set_items_per_page(25).is_err());
        assert_eq!(state.items_per_page(), 50);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut state = PaginationState::new(10).unwrap();
        state.sync_client_total(100);
        state.go_to(9);
        state.sync_client_total(31);
        assert_eq!(state.current_page(), 4);
    }

    #[test]
    fn test_server_pages_are_not_resliced() {
        let page: Vec<u32> = (0..10).collect();
        let mut state = PaginationState::new(10).unwrap();
        state.apply_server_meta(3, 42);

        assert_eq!(state.source(), PageSource::Server);
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.total_pages(), 5);
        assert_eq!(state.page_slice(&page).len(), 10);
    }

    #[test]
    fn test_pagination_info() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);

        let empty = Pagination::new(1, 10, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let end = Pagination::new(10, 10, 100);
        assert_eq!(end.page_numbers(5), vec![6, 7, 8, 9, 10]);
    }
}
