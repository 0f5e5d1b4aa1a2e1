//! Sort keys and comparators.

use crate::catalog::Product;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Product field the listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Price,
    Weight,
    Rating,
    Likes,
    /// Any key the engine does not know. Compares every pair as equal.
    #[serde(other)]
    Unsorted,
}

impl SortBy {
    /// Parse a key, mapping anything unrecognized to [`SortBy::Unsorted`].
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "name" => SortBy::Name,
            "price" => SortBy::Price,
            "weight" => SortBy::Weight,
            "rating" => SortBy::Rating,
            "likes" => SortBy::Likes,
            _ => SortBy::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Price => "price",
            SortBy::Weight => "weight",
            SortBy::Rating => "rating",
            SortBy::Likes => "likes",
            SortBy::Unsorted => "unsorted",
        }
    }

    /// Ascending comparison of two products on this key.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::Name => locale_compare(&a.name, &b.name),
            SortBy::Price => numeric_compare(a.price, b.price),
            SortBy::Weight => numeric_compare(a.weight, b.weight),
            SortBy::Rating => numeric_compare(a.rating, b.rating),
            SortBy::Likes => a.likes.cmp(&b.likes),
            SortBy::Unsorted => Ordering::Equal,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Apply the direction to an ascending comparison.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// The sort choices offered to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortPreset {
    NameAsc,
    PriceAsc,
    PriceDesc,
    WeightAsc,
    WeightDesc,
    LikesDesc,
}

impl SortPreset {
    /// All presets in menu order.
    pub const ALL: [SortPreset; 6] = [
        SortPreset::NameAsc,
        SortPreset::PriceAsc,
        SortPreset::PriceDesc,
        SortPreset::WeightAsc,
        SortPreset::WeightDesc,
        SortPreset::LikesDesc,
    ];

    /// Key and direction this preset selects.
    pub fn key(&self) -> (SortBy, SortOrder) {
        match self {
            SortPreset::NameAsc => (SortBy::Name, SortOrder::Asc),
            SortPreset::PriceAsc => (SortBy::Price, SortOrder::Asc),
            SortPreset::PriceDesc => (SortBy::Price, SortOrder::Desc),
            SortPreset::WeightAsc => (SortBy::Weight, SortOrder::Asc),
            SortPreset::WeightDesc => (SortBy::Weight, SortOrder::Desc),
            SortPreset::LikesDesc => (SortBy::Likes, SortOrder::Desc),
        }
    }

    /// Find the preset matching a key/direction pair, if one is offered.
    pub fn matching(sort_by: SortBy, sort_order: SortOrder) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == (sort_by, sort_order))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortPreset::NameAsc => "Name: A-Z",
            SortPreset::PriceAsc => "Price: Low to High",
            SortPreset::PriceDesc => "Price: High to Low",
            SortPreset::WeightAsc => "Weight: Lightest",
            SortPreset::WeightDesc => "Weight: Heaviest",
            SortPreset::LikesDesc => "Most Liked",
        }
    }
}

impl fmt::Display for SortPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (by, order) = self.key();
        write!(f, "{}-{}", by.as_str(), order.as_str())
    }
}

impl FromStr for SortPreset {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.to_string() == s.trim().to_lowercase())
            .ok_or_else(|| CatalogError::UnknownSortPreset(s.to_string()))
    }
}

/// Case-insensitive ordering of display names.
///
/// Names that differ only in case put the lowercase form first, so equal
/// keys are the only ones reported as `Equal`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Numeric ordering; incomparable values (NaN) count as equal.
fn numeric_compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
