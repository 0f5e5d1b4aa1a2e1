//! Catalog error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product cannot be added because it is not in stock.
    #[error("Product is out of stock: {0}")]
    OutOfStock(ProductId),

    /// Checkout attempted with nothing selected.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart index outside the current selection.
    #[error("No cart entry at position {0}")]
    InvalidCartIndex(usize),

    /// Page size outside the offered options.
    #[error("Invalid items per page: {0} (expected one of 10, 50, 100)")]
    InvalidItemsPerPage(usize),

    /// Range with a low end above its high end.
    #[error("Invalid range: {lo} > {hi}")]
    InvalidRange { lo: f64, hi: f64 },

    /// Unrecognized sort preset.
    #[error("Unknown sort preset: {0}")]
    UnknownSortPreset(String),

    /// Share link origin could not be parsed.
    #[error("Invalid share link: {0}")]
    InvalidShareLink(#[from] url::ParseError),

    /// Session storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] catalog_session::StorageError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}
