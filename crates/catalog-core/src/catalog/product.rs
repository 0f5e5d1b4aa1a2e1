//! Product types.

use crate::ids::ProductId;
use crate::money::Rupiah;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Physical extent of a product along three axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    /// Create dimensions from the three axes.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// The unit cube, used when a record carries no geometry.
    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Largest of the three axes. This is the "size" facet.
    pub fn max_axis(&self) -> f64 {
        self.width.max(self.height).max(self.depth)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::unit()
    }
}

/// A product in the catalog.
///
/// Serialized in camelCase with the barcode under `kode_barcode`, the same
/// shape as the storefront's own `cartItems` session value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label (the lookup code for remote records).
    pub category: String,
    /// Longer description for the detail view.
    pub description: String,
    /// Price in rupiah. Never negative.
    pub price: f64,
    /// Weight in grams. Never negative.
    pub weight: f64,
    /// Physical dimensions.
    pub dimensions: Dimensions,
    /// Image URL. Empty when no image could be resolved.
    pub image: String,
    /// Whether the product can be added to the cart.
    pub in_stock: bool,
    /// Average rating.
    pub rating: f64,
    /// Like counter.
    pub likes: u32,
    /// Opaque barcode / lookup code.
    #[serde(rename = "kode_barcode")]
    pub barcode: String,
}

impl Product {
    /// Create an in-stock product with zeroed facets.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            price: 0.0,
            weight: 0.0,
            dimensions: Dimensions::unit(),
            image: String::new(),
            in_stock: true,
            rating: 0.0,
            likes: 0,
            barcode: String::new(),
        }
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the dimensions.
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Set availability.
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Set the popularity counters.
    pub fn with_popularity(mut self, rating: f64, likes: u32) -> Self {
        self.rating = rating;
        self.likes = likes;
        self
    }

    /// The size facet: the largest dimension.
    pub fn max_dimension(&self) -> f64 {
        self.dimensions.max_axis()
    }

    /// Price formatted for display.
    pub fn display_price(&self) -> String {
        Rupiah(self.price).to_string()
    }

    /// Label shown above the name: category, plus barcode when it differs.
    pub fn label(&self) -> String {
        if self.barcode.is_empty() || self.barcode == self.category {
            self.category.clone()
        } else {
            format!("{} - {}", self.category, self.barcode)
        }
    }

    /// Value printed in the product's QR code: the barcode, or the id when
    /// the record has none.
    pub fn qr_value(&self) -> String {
        if self.barcode.is_empty() {
            self.id.to_string()
        } else {
            self.barcode.clone()
        }
    }

    /// Check the numeric invariants.
    pub fn has_valid_facets(&self) -> bool {
        self.price >= 0.0 && self.weight >= 0.0
    }
}

/// Find the first id that appears more than once in `products`.
pub fn find_duplicate_id(products: &[Product]) -> Option<ProductId> {
    let mut seen = HashSet::with_capacity(products.len());
    products.iter().map(|p| p.id).find(|id| !seen.insert(*id))
}

/// Look up a product by id.
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new(1, "Cincin Emas", "Cincin").with_price(1_500_000.0);
        assert_eq!(product.id, ProductId::new(1));
        assert!(product.in_stock);
        assert_eq!(product.dimensions, Dimensions::unit());
        assert_eq!(product.display_price(), "Rp 1.500.000");
    }

    #[test]
    fn test_max_dimension() {
        let product = Product::new(1, "Kalung", "Kalung")
            .with_dimensions(Dimensions::new(2.0, 45.0, 0.5));
        assert_eq!(product.max_dimension(), 45.0);
    }

    #[test]
    fn test_label() {
        let mut product = Product::new(1, "Gelang", "GL01");
        product.barcode = "GL01".to_string();
        assert_eq!(product.label(), "GL01");

        product.category = "Gelang".to_string();
        assert_eq!(product.label(), "Gelang - GL01");
    }

    #[test]
    fn test_duplicate_detection() {
        let products = vec![
            Product::new(1, "A", "x"),
            Product::new(2, "B", "x"),
            Product::new(1, "C", "x"),
        ];
        assert_eq!(find_duplicate_id(&products), Some(ProductId::new(1)));
        assert_eq!(find_duplicate_id(&products[..2]), None);
        assert_eq!(find_product(&products, ProductId::new(2)).map(|p| p.name.as_str()), Some("B"));
    }

    #[test]
    fn test_camel_case_serialization() {
        let product = Product::new(3, "Bros", "Bros").with_stock(false);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["inStock"], false);
        assert_eq!(json["id"], 3);

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_reads_storefront_session_value() {
        let raw = r#"{
            "id": 12,
            "name": "Liontin Hati",
            "category": "Liontin",
            "price": 2500000,
            "weight": 2.1,
            "dimensions": { "width": 1, "height": 1, "depth": 1 },
            "image": "",
            "description": "",
            "inStock": true,
            "rating": 0,
            "likes": 4,
            "kode_barcode": "LT-012"
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.barcode, "LT-012");
        assert_eq!(product.likes, 4);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["kode_barcode"], "LT-012");
        assert!(json.get("barcode").is_none());
    }

    #[test]
    fn test_qr_value_falls_back_to_id() {
        let mut product = Product::new(42, "Anting", "Anting");
        assert_eq!(product.qr_value(), "42");

        product.barcode = "AT-042".to_string();
        assert_eq!(product.qr_value(), "AT-042");
    }
}
