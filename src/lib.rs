//! Shelf
//!
//! Shelf prices a shopping cart of books, discounting distinct titles from a
//! series that are bought together: the more different books of the series
//! in one grouping, the larger the discount.
//!
//! ```
//! use rust_decimal::Decimal;
//! use rusty_money::{Money, iso::GBP};
//! use shelf::prelude::*;
//!
//! # fn main() -> Result<(), CartError> {
//! let series: Vec<Book<'_>> = (1..=5)
//!     .map(|n| Book::new(format!("ISBN-{n}"), format!("Volume {n}"), Money::from_minor(800, GBP)))
//!     .collect();
//!
//! let mut cart = Cart::new(series.iter().take(3).cloned().collect::<Vec<_>>())?;
//! cart.set_series(series);
//!
//! assert_eq!(cart.calculate_total_price(), Decimal::new(2160, 2));
//! # Ok(())
//! # }
//! ```

pub mod books;
pub mod cart;
pub mod diagnostics;
pub mod discounts;
pub mod fixtures;
pub mod partition;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod series;
pub mod utils;
