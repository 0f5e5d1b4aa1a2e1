//! The filter/sort pipeline over an in-memory product list.

use crate::catalog::Product;
use crate::search::FilterState;

/// Filter `products` by `filters` and order the survivors.
///
/// Pure and deterministic. The sort is stable, so products with equal keys
/// keep the relative order they had in `products` in either direction.
pub fn filter_and_sort(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| filters.sort_order.apply(filters.sort_by.compare(a, b)));
    filtered
}
