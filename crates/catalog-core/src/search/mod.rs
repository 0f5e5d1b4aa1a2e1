//! Search module.
//!
//! Contains the filter state, the filter/sort pipeline and pagination.

mod browse;
mod filter;
mod query;
mod results;
mod sort;

pub use browse::{BrowseState, BrowseView};
pub use filter::{FilterState, Range, DEFAULT_CATEGORIES, PRICE_BOUNDS, SIZE_BOUNDS, WEIGHT_BOUNDS};
pub use query::filter_and_sort;
pub use results::{
    total_pages, PageSource, PageSummary, Pagination, PaginationState, DEFAULT_ITEMS_PER_PAGE,
    ITEMS_PER_PAGE_OPTIONS,
};
pub use sort::{locale_compare, SortBy, SortOrder, SortPreset};
