//! Price display.
//!
//! Catalog prices are whole rupiah carried as `f64` (they share the range
//! machinery with weight and size), so display rounds to the nearest unit.

use std::fmt;

/// A rupiah amount formatted the Indonesian way: `Rp 1.250.000`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Rupiah(pub f64);

impl Rupiah {
    /// Format without the currency symbol (e.g. "1.250.000").
    pub fn display_amount(&self) -> String {
        let rounded = self.0.round();
        let negative = rounded < 0.0;
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        if negative {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rp {}", self.display_amount())
    }
}
