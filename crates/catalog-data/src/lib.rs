//! Remote catalog access for the catalog browser.
//!
//! This crate provides:
//! - `ProductSource` / `HttpProductSource` - the paged list endpoint
//! - `ImageResolver` / `HttpImageResolver` - image URL lookup by storage path
//! - `ProductAdapter` - raw records to products, images resolved concurrently
//! - `CatalogLoader` - applies only the newest of overlapping loads
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_data::prelude::*;
//! use std::time::Duration;
//!
//! let source = HttpProductSource::new("http://localhost:3000/", "barang/get/barang-catalog", Duration::from_secs(10))?;
//! let images = HttpImageResolver::new("https://firebasestorage.googleapis.com/v0/b/shop/o/", Duration::from_secs(5))?;
//! let loader = CatalogLoader::new(source, ProductAdapter::new(images));
//!
//! let outcome = loader.load(&ListRequest::new(&filters, &pagination)).await;
//! let products = loader.snapshot().products;
//! ```

mod adapter;
mod client;
mod error;
mod image;
mod loader;
mod request;
mod response;

pub use adapter::{convert, ProductAdapter, DEFAULT_IMAGE_TIMEOUT};
pub use client::{HttpProductSource, ProductSource};
pub use error::FetchError;
pub use image::{image_path, HttpImageResolver, ImageResolver, DEFAULT_IMAGE_FOLDER};
pub use loader::{CatalogLoader, CatalogState, LoadOutcome};
pub use request::ListRequest;
pub use response::{ListResponse, PageMeta, RawId, RawRecord};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogLoader, FetchError, HttpImageResolver, HttpProductSource, ImageResolver,
        ListRequest, LoadOutcome, ProductAdapter, ProductSource,
    };
}
