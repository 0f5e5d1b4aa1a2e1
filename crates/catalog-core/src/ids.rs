//! Product identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer identity of a catalog product.
///
/// Unique within one loaded list. Ids handed out by the catalog start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create an ID from its integer value.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
        assert!("seven".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_integer() {
        let json = serde_json::to_string(&ProductId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
