//! Session-backed cart store.

use std::sync::{Arc, Mutex, MutexGuard};

use catalog_session::{JsonStorageExt, SessionStorage};
use tracing::{debug, warn};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Session storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cartItems";

/// The cart for one browsing session, written through to session storage.
///
/// Every mutation re-serializes the whole selection before returning, so a
/// reader never observes state that is not yet persisted. A failed write is
/// logged and the in-memory cart is kept as is.
#[derive(Debug)]
pub struct CartStore<S: SessionStorage> {
    storage: S,
    cart: Cart,
}

impl<S: SessionStorage> CartStore<S> {
    /// Create the store, restoring any cart persisted earlier in the session.
    ///
    /// Absent, unreadable or malformed data yields an empty cart.
    pub fn restore(storage: S) -> Self {
        let cart = match storage.get_json::<Cart>(CART_STORAGE_KEY) {
            Ok(Some(cart)) => {
                debug!(items = cart.len(), "restored cart from session");
                // Rebuild through `add` so a hand-edited value cannot carry
                // repeated ids.
                cart.into_iter().collect()
            }
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(key = CART_STORAGE_KEY, %error, "discarding unreadable persisted cart");
                Cart::new()
            }
        };
        Self { storage, cart }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Whether a product with `id` is already selected.
    pub fn contains(&self, id: ProductId) -> bool {
        self.cart.contains(id)
    }

    /// Add `product` unless already present. Returns `true` if it was added.
    pub fn add(&mut self, product: Product) -> bool {
        let added = self.cart.add(product);
        if added {
            self.persist();
        }
        added
    }

    /// Add from a product card, which only offers in-stock products.
    pub fn try_add(&mut self, product: Product) -> Result<bool, CatalogError> {
        if !product.in_stock {
            return Err(CatalogError::OutOfStock(product.id));
        }
        Ok(self.add(product))
    }

    /// Remove the entry at `index`. Out of range is a silent no-op.
    pub fn remove(&mut self, index: usize) -> Option<Product> {
        let removed = self.cart.remove(index);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    /// Replace the selection in one mutation.
    pub fn replace(&mut self, products: impl IntoIterator<Item = Product>) {
        self.cart.replace(products);
        self.persist();
    }

    /// Apply a decoded share token.
    ///
    /// Replaces the selection only when the decoded list is non-empty; an
    /// absent token or one matching nothing leaves the cart untouched.
    /// Returns `true` if the cart was replaced.
    pub fn apply_shared(&mut self, decoded: Option<Vec<Product>>) -> bool {
        match decoded {
            Some(products) if !products.is_empty() => {
                self.replace(products);
                true
            }
            _ => false,
        }
    }

    /// End the session's cart: empty it and drop the persisted value.
    pub fn clear(&mut self) {
        self.cart.clear();
        if let Err(error) = self.storage.remove_item(CART_STORAGE_KEY) {
            warn!(key = CART_STORAGE_KEY, %error, "failed to remove persisted cart");
        }
    }

    /// The selection to show at checkout. An empty cart cannot check out.
    pub fn checkout(&self) -> Result<&Cart, CatalogError> {
        if self.cart.is_empty() {
            return Err(CatalogError::EmptyCart);
        }
        Ok(&self.cart)
    }

    fn persist(&self) {
        if let Err(error) = self.storage.set_json(CART_STORAGE_KEY, &self.cart) {
            warn!(key = CART_STORAGE_KEY, items = self.cart.len(), %error, "cart write-through failed");
        }
    }
}

/// A cart store shared by every view of the session.
///
/// Cloning the handle shares the same store. Each operation takes the lock
/// once and performs its whole read-modify-write under it.
#[derive(Debug)]
pub struct SharedCart<S: SessionStorage> {
    inner: Arc<Mutex<CartStore<S>>>,
}

impl<S: SessionStorage> Clone for SharedCart<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SessionStorage> SharedCart<S> {
    pub fn new(store: CartStore<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Restore from `storage` and wrap in a shared handle.
    pub fn restore(storage: S) -> Self {
        Self::new(CartStore::restore(storage))
    }

    fn lock(&self) -> MutexGuard<'_, CartStore<S>> {
        // A panic while holding the lock cannot leave the cart half-written:
        // every mutation is a single Vec operation followed by the write.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add(&self, product: Product) -> bool {
        self.lock().add(product)
    }

    pub fn try_add(&self, product: Product) -> Result<bool, CatalogError> {
        self.lock().try_add(product)
    }

    pub fn remove(&self, index: usize) -> Option<Product> {
        self.lock().remove(index)
    }

    pub fn replace(&self, products: impl IntoIterator<Item = Product>) {
        self.lock().replace(products)
    }

    pub fn apply_shared(&self, decoded: Option<Vec<Product>>) -> bool {
        self.lock().apply_shared(decoded)
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current selection.
    pub fn snapshot(&self) -> Cart {
        self.lock().cart().clone()
    }

    /// Copy of the selection for checkout.
    pub fn checkout(&self) -> Result<Cart, CatalogError> {
        self.lock().checkout().cloned()
    }

    /// Run `f` against the store under a single lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut CartStore<S>) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_session::{MemoryStorage, StorageError};

    fn product(id: i64) -> Product {
        Product::new(id, format!("Item {}", id), "Gelang")
    }

    fn persisted_ids(storage: &MemoryStorage) -> Vec<i64> {
        let cart: Cart = storage.get_json(CART_STORAGE_KEY).unwrap().unwrap();
        cart.iter().map(|p| p.id.get()).collect()
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl SessionStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::OpenError("read-only".into()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::OpenError("read-only".into()))
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_restore_absent_is_empty() {
        let store = CartStore::restore(MemoryStorage::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_restore_malformed_is_empty() {
        let storage = MemoryStorage::with_item(CART_STORAGE_KEY, "{not json");
        let store = CartStore::restore(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_restore_roundtrip() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = CartStore::restore(Arc::clone(&storage));
            store.add(product(4));
            store.add(product(2));
        }
        let store = CartStore::restore(storage);
        let ids: Vec<i64> = store.cart().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![4, 2]);
    }

    #[test]
    fn test_restore_drops_repeated_ids() {
        let raw = serde_json::to_string(&vec![product(1), product(1), product(2)]).unwrap();
        let store = CartStore::restore(MemoryStorage::with_item(CART_STORAGE_KEY, raw));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::restore(Arc::clone(&storage));

        store.add(product(1));
        assert_eq!(persisted_ids(&storage), vec![1]);
        store.add(product(2));
        assert_eq!(persisted_ids(&storage), vec![1, 2]);
        store.remove(0);
        assert_eq!(persisted_ids(&storage), vec![2]);
        store.replace([product(7), product(8)]);
        assert_eq!(persisted_ids(&storage), vec![7, 8]);
    }

    #[test]
    fn test_duplicate_add_keeps_order() {
        let mut store = CartStore::restore(MemoryStorage::new());
        store.add(product(1));
        store.add(product(2));
        assert!(!store.add(product(1)));
        assert_eq!(store.cart().ids(), vec![ProductId::new(1), ProductId::new(2)]);
    }

    #[test]
    fn test_try_add_refuses_out_of_stock() {
        let mut store = CartStore::restore(MemoryStorage::new());
        let err = store.try_add(product(3).with_stock(false)).unwrap_err();
        assert!(matches!(err, CatalogError::OutOfStock(id) if id == ProductId::new(3)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_checkout_requires_items() {
        let mut store = CartStore::restore(MemoryStorage::new());
        assert!(matches!(store.checkout(), Err(CatalogError::EmptyCart)));
        store.add(product(1));
        assert_eq!(store.checkout().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_removes_persisted_value() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::restore(Arc::clone(&storage));
        store.add(product(1));
        store.clear();
        assert!(store.is_empty());
        assert!(!storage.exists(CART_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_apply_shared_only_when_non_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::restore(Arc::clone(&storage));
        store.add(product(1));

        assert!(!store.apply_shared(None));
        assert!(!store.apply_shared(Some(Vec::new())));
        assert_eq!(persisted_ids(&storage), vec![1]);

        assert!(store.apply_shared(Some(vec![product(3), product(5)])));
        assert_eq!(persisted_ids(&storage), vec![3, 5]);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut store = CartStore::restore(ReadOnlyStorage);
        assert!(store.add(product(1)));
        assert_eq!(store.len(), 1);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_shared_handles_see_one_cart() {
        let storage = Arc::new(MemoryStorage::new());
        let listing = SharedCart::restore(Arc::clone(&storage));
        let header = listing.clone();

        listing.add(product(1));
        assert_eq!(header.len(), 1);
        assert!(header.contains(ProductId::new(1)));

        header.remove(0);
        assert!(listing.is_empty());
        assert!(persisted_ids(&storage).is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let shared = SharedCart::restore(MemoryStorage::new());
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let cart = shared.clone();
                std::thread::spawn(move || {
                    cart.add(product(i));
                    cart.add(product(1));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.len(), 8);
        assert!(snapshot.is_unique());
    }
}
