//! Discounts
//!
//! Series discounts are an exact-match table from "number of distinct series
//! books grouped together" to a percentage. Sizes missing from the table get
//! no discount, including sizes above the largest tier.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

/// Exact-match discount table keyed on group size.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDiscount {
    tiers: FxHashMap<usize, Percentage>,
}

impl SeriesDiscount {
    /// Create a discount table from `(group size, percentage)` pairs.
    ///
    /// Later pairs replace earlier ones for the same group size.
    pub fn new(tiers: impl IntoIterator<Item = (usize, Percentage)>) -> Self {
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }

    /// Create a table that never discounts.
    pub fn none() -> Self {
        Self {
            tiers: FxHashMap::default(),
        }
    }

    /// Return the discount for a group of `group_size` distinct books.
    pub fn discount_percentage(&self, group_size: usize) -> Percentage {
        self.tiers
            .get(&group_size)
            .copied()
            .unwrap_or_else(|| Percentage::from(Decimal::ZERO))
    }
}

impl Default for SeriesDiscount {
    /// 2 books: 5%, 3 books: 10%, 4 books: 20%, 5 books: 25%.
    fn default() -> Self {
        Self::new([
            (2, Percentage::from(Decimal::new(5, 2))),
            (3, Percentage::from(Decimal::new(10, 2))),
            (4, Percentage::from(Decimal::new(20, 2))),
            (5, Percentage::from(Decimal::new(25, 2))),
        ])
    }
}

/// Calculate the discount amount for a subtotal, without rounding.
pub fn discount_on(subtotal: Decimal, percent: Percentage) -> Decimal {
    percent * subtotal
}

/// Express a percentage in points for display (e.g. `0.25` becomes `25`).
pub fn percentage_points(percent: Percentage) -> Decimal {
    (percent * Decimal::ONE_HUNDRED).normalize()
}
