//! Browsing state: filters plus pagination, with the reset rules between them.

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::search::{filter_and_sort, FilterState, PageSource, PageSummary, Pagination, PaginationState};
use serde::Serialize;

/// What the listing renders for one state.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseView {
    /// Products on the current page, filtered and sorted.
    pub items: Vec<Product>,
    pub pagination: Pagination,
    pub summary: PageSummary,
}

/// Filter and pagination state for the product listing.
///
/// Every filter edit and every page size change goes through here so the
/// current page is always reset to 1 alongside it.
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    filters: FilterState,
    pagination: PaginationState,
}

impl BrowseState {
    /// Create a browse state with the given page size.
    pub fn new(items_per_page: usize) -> Result<Self, CatalogError> {
        Ok(Self {
            filters: FilterState::default(),
            pagination: PaginationState::new(items_per_page)?,
        })
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Mutable access for navigation (next/prev/go_to) and meta updates.
    pub fn pagination_mut(&mut self) -> &mut PaginationState {
        &mut self.pagination
    }

    /// Replace the filters. Resets to page 1, even if nothing changed.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.pagination.reset();
    }

    /// Edit the filters in place. Resets to page 1.
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut FilterState)) {
        edit(&mut self.filters);
        self.pagination.reset();
    }

    /// Change the page size. Resets to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<(), CatalogError> {
        self.pagination.set_items_per_page(items_per_page)
    }

    /// Run the pipeline over `products` and cut out the current page.
    ///
    /// With a client-side source the total follows the filtered length; with
    /// a server-side source the reported total is kept and `products` is
    /// taken to be the current page already.
    pub fn view(&mut self, products: &[Product]) -> BrowseView {
        let filtered = filter_and_sort(products, &self.filters);
        if self.pagination.source() == PageSource::Client {
            self.pagination.sync_client_total(filtered.len());
        }

        let items = self.pagination.page_slice(&filtered).to_vec();
        BrowseView {
            summary: PageSummary {
                shown: items.len(),
                total: self.pagination.total(),
            },
            pagination: self.pagination.info(),
            items,
        }
    }
}
