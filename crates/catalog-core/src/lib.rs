//! Catalog browsing domain types and logic.
//!
//! This crate holds everything about the storefront catalog that does not
//! touch the network:
//!
//! - **Catalog**: Products, dimensions, per-card like state
//! - **Search**: Filter state, the filter/sort pipeline, pagination
//! - **Cart**: Session-backed selection and share links
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_core::prelude::*;
//! use catalog_session::MemoryStorage;
//!
//! let products = vec![
//!     Product::new(1, "Cincin Emas", "Cincin").with_price(1_250_000.0).with_weight(3.0),
//!     Product::new(2, "Kalung Rantai", "Kalung").with_price(4_800_000.0).with_weight(9.5),
//! ];
//!
//! // Filter, sort and page
//! let mut browse = BrowseState::new(10)?;
//! browse.update_filters(|f| f.toggle_category("Cincin"));
//! let view = browse.view(&products);
//!
//! // Select and share
//! let cart = SharedCart::restore(MemoryStorage::new());
//! cart.add(view.items[0].clone());
//! let link = ShareLink::build("http://localhost:5173", &cart.snapshot())?;
//! println!("{}", link); // http://localhost:5173/cart/share?ids=1
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use ids::ProductId;
pub use money::Rupiah;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::ProductId;
    pub use crate::money::Rupiah;

    // Catalog
    pub use crate::catalog::{Dimensions, LikeCooldown, Product};

    // Search
    pub use crate::search::{
        filter_and_sort, BrowseState, BrowseView, FilterState, PageSource, PageSummary,
        Pagination, PaginationState, Range, SortBy, SortOrder, SortPreset,
    };

    // Cart
    pub use crate::cart::{Cart, CartStore, ShareLink, ShareToken, SharedCart};
}
