//! Raw record to `Product` conversion.

use std::time::Duration;

use catalog_core::catalog::{Dimensions, Product};
use futures::future::join_all;
use tracing::warn;

use crate::image::{image_path, ImageResolver, DEFAULT_IMAGE_FOLDER};
use crate::response::RawRecord;

/// Default bound on a single image lookup.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Converts server records into products, resolving one image each.
pub struct ProductAdapter<R> {
    resolver: R,
    folder: String,
    timeout: Duration,
}

impl<R: ImageResolver> ProductAdapter<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            folder: DEFAULT_IMAGE_FOLDER.to_string(),
            timeout: DEFAULT_IMAGE_TIMEOUT,
        }
    }

    /// Set the storage folder images are looked up in.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Set the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Convert a whole page.
    ///
    /// Every image lookup is in flight at once and the page is returned when
    /// all of them have settled. A failed or timed out lookup leaves that
    /// product with an empty image. Records without an integer id are
    /// skipped. Output keeps the record order.
    pub async fn convert_page(&self, records: &[RawRecord]) -> Vec<Product> {
        let converted = join_all(records.iter().map(|record| async move {
            let image = self.resolve_image(&record.kode_barang).await;
            convert(record, image)
        }))
        .await;

        converted.into_iter().flatten().collect()
    }

    /// Resolve the image for `code`, degrading to an empty URL.
    pub async fn resolve_image(&self, code: &str) -> String {
        let path = image_path(&self.folder, code);
        match tokio::time::timeout(self.timeout, self.resolver.resolve(&path)).await {
            Ok(Ok(url)) => url,
            Ok(Err(error)) => {
                warn!(%path, %error, "image lookup failed");
                String::new()
            }
            Err(_) => {
                warn!(%path, timeout_ms = self.timeout.as_millis() as u64, "image lookup timed out");
                String::new()
            }
        }
    }
}

/// Map one record onto the product shape.
///
/// Returns `None` when the identifier is not an integer.
pub fn convert(record: &RawRecord, image: String) -> Option<Product> {
    let Some(id) = record.id.to_i64() else {
        warn!(id = ?record.id, code = %record.kode_barang, "skipping record without an integer id");
        return None;
    };

    let price = record.harga_jual_catalog.filter(|p| *p > 0.0).unwrap_or(0.0);
    let weight = record.berat.filter(|w| *w > 0.0).unwrap_or(1.0);
    let grade = record.kadar.as_deref().unwrap_or_default();

    let mut product = Product::new(id, record.nama_barang.clone(), record.kode_barang.clone())
        .with_price(price)
        .with_weight(weight)
        .with_dimensions(Dimensions::unit());
    product.description = format!("{} - {}", record.nama_barang, grade);
    product.barcode = record.kode_barang.clone();
    product.image = image;
    Some(product)
}
