//! Filter state and the membership predicate.

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::search::{SortBy, SortOrder, SortPreset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Domain-wide price bounds, in rupiah.
pub const PRICE_BOUNDS: Range = Range { lo: 0.0, hi: 10_000_000.0 };
/// Domain-wide weight bounds, in grams.
pub const WEIGHT_BOUNDS: Range = Range { lo: 0.0, hi: 50.0 };
/// Domain-wide size bounds (largest dimension).
pub const SIZE_BOUNDS: Range = Range { lo: 0.0, hi: 1000.0 };

/// Categories offered by default in the category picker.
pub const DEFAULT_CATEGORIES: [&str; 6] = ["Cincin", "Kalung", "Gelang", "Anting", "Bros", "Liontin"];

/// An inclusive numeric range with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    lo: f64,
    hi: f64,
}

impl Range {
    /// Create a range, rejecting `lo > hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Self, CatalogError> {
        if lo > hi || lo.is_nan() || hi.is_nan() {
            return Err(CatalogError::InvalidRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Inclusive membership test.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    /// Move the low handle; it cannot pass the high handle.
    pub fn set_lo(&mut self, lo: f64) {
        self.lo = lo.min(self.hi);
    }

    /// Move the high handle; it cannot pass the low handle.
    pub fn set_hi(&mut self, hi: f64) {
        self.hi = hi.max(self.lo);
    }
}

impl TryFrom<(f64, f64)> for Range {
    type Error = CatalogError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self, Self::Error> {
        Range::new(lo, hi)
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.lo, range.hi)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

impl FromStr for Range {
    type Err = CatalogError;

    /// Parse `LO..HI`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidRange { lo: f64::NAN, hi: f64::NAN };
        let (lo, hi) = s.split_once("..").ok_or_else(invalid)?;
        let lo: f64 = lo.trim().parse().map_err(|_| invalid())?;
        let hi: f64 = hi.trim().parse().map_err(|_| invalid())?;
        Range::new(lo, hi)
    }
}

/// The shopper's current filter and sort criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Selected categories. Empty means "all".
    pub categories: BTreeSet<String>,
    pub price_range: Range,
    pub weight_range: Range,
    /// Range on the largest dimension.
    pub size_range: Range,
    pub search_query: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            price_range: PRICE_BOUNDS,
            weight_range: WEIGHT_BOUNDS,
            size_range: SIZE_BOUNDS,
            search_query: String::new(),
            sort_by: SortBy::Name,
            sort_order: SortOrder::Asc,
        }
    }
}

impl FilterState {
    /// Create the default filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search query.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Select a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, range: Range) -> Self {
        self.price_range = range;
        self
    }

    /// Set the weight range.
    pub fn with_weight_range(mut self, range: Range) -> Self {
        self.weight_range = range;
        self
    }

    /// Set the size range.
    pub fn with_size_range(mut self, range: Range) -> Self {
        self.size_range = range;
        self
    }

    /// Set the sort key and direction.
    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Apply one of the offered sort presets.
    pub fn with_preset(self, preset: SortPreset) -> Self {
        let (by, order) = preset.key();
        self.with_sort(by, order)
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    /// Whether a non-empty search query is set.
    pub fn is_searching(&self) -> bool {
        !self.search_query.is_empty()
    }

    /// Decide whether `product` belongs in the filtered view.
    ///
    /// A non-empty search query alone decides membership: the product is
    /// kept iff its name contains the query, ignoring case, and every other
    /// criterion (stock, category, ranges) is bypassed.
    pub fn matches(&self, product: &Product) -> bool {
        if self.is_searching() {
            return product
                .name
                .to_lowercase()
                .contains(&self.search_query.to_lowercase());
        }

        product.in_stock
            && (self.categories.is_empty() || self.categories.contains(&product.category))
            && self.price_range.contains(product.price)
            && self.weight_range.contains(product.weight)
            && self.size_range.contains(product.max_dimension())
    }
}
