//! The remote "list products" request.

use catalog_core::search::{FilterState, PaginationState, Range};
use url::Url;

/// One page request against the list endpoint.
///
/// Carries pagination and the numeric filter ranges. Category, search and
/// sort are applied locally and never sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    /// Requested page (1-indexed).
    pub page: usize,
    pub limit: usize,
    pub weight: Range,
    pub size: Range,
    pub price: Range,
}

impl ListRequest {
    /// Build the request for the current browse state.
    pub fn new(filters: &FilterState, pagination: &PaginationState) -> Self {
        Self {
            page: pagination.current_page(),
            limit: pagination.items_per_page(),
            weight: filters.weight_range,
            size: filters.size_range,
            price: filters.price_range,
        }
    }

    /// Ask for `page` with `limit` items instead.
    pub fn with_page(mut self, page: usize, limit: usize) -> Self {
        self.page = page.max(1);
        self.limit = limit;
        self
    }

    /// Query parameters in the order the server expects them.
    ///
    /// `skip` carries the page number, not an item offset; the server
    /// computes the offset itself.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("skip", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("berat_awal", self.weight.lo().to_string()),
            ("berat_akhir", self.weight.hi().to_string()),
            ("size_awal", self.size.lo().to_string()),
            ("size_akhir", self.size.hi().to_string()),
            ("harga_awal", self.price.lo().to_string()),
            ("harga_akhir", self.price.hi().to_string()),
        ]
    }

    /// Full request URL against `endpoint`.
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut().clear().extend_pairs(self.query_pairs());
        url
    }
}
