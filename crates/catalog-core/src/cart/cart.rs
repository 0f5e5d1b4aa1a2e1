//! The shopper's selection.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Rupiah;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered selection of products, unique by id.
///
/// Insertion order is display order. Serializes as a plain JSON array of
/// products, which is the shape kept in session storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `product` unless one with the same id is already present.
    ///
    /// Returns `true` if the cart changed.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Remove the entry at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Product> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Replace the whole selection, keeping the first of any repeated id.
    pub fn replace(&mut self, products: impl IntoIterator<Item = Product>) {
        self.items.clear();
        for product in products {
            self.add(product);
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    /// Number of products (the badge count).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    /// Product ids in cart order.
    pub fn ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|p| p.id).collect()
    }

    /// Sum of the item prices.
    pub fn total(&self) -> Rupiah {
        Rupiah(self.items.iter().map(|p| p.price).sum())
    }

    /// Whether every id is distinct. Holds for any cart built through `add`.
    pub fn is_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.items.iter().all(|p| seen.insert(p.id))
    }
}

impl FromIterator<Product> for Cart {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut cart = Cart::new();
        cart.replace(iter);
        cart
    }
}

impl IntoIterator for Cart {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64) -> Product {
        Product::new(id, format!("Item {}", id), "Cincin").with_price(id as f64 * 100_000.0)
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut cart = Cart::new();
        assert!(cart.add(product(1)));
        assert!(cart.add(product(2)));
        assert!(!cart.add(product(1)));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.ids(), vec![ProductId::new(1), ProductId::new(2)]);
    }

    #[test]
    fn test_remove_by_index() {
        let mut cart: Cart = [product(1), product(2), product(3)].into_iter().collect();
        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.id, ProductId::new(2));
        assert_eq!(cart.ids(), vec![ProductId::new(1), ProductId::new(3)]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart: Cart = [product(1)].into_iter().collect();
        assert!(cart.remove(5).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_replace_dedups() {
        let mut cart = Cart::new();
        cart.replace([product(3), product(1), product(3)]);
        assert_eq!(cart.ids(), vec![ProductId::new(3), ProductId::new(1)]);
        assert!(cart.is_unique());
    }

    #[test]
    fn test_total() {
        let cart: Cart = [product(1), product(2)].into_iter().collect();
        assert_eq!(cart.total(), Rupiah(300_000.0));
    }

    #[test]
    fn test_serializes_as_array() {
        let cart: Cart = [product(1)].into_iter().collect();
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["inStock"], true);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
