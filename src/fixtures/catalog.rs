//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, JPY, USD},
};
use serde::Deserialize;

use crate::{books::Book, fixtures::FixtureError};

/// Wrapper for books in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of book key -> book fixture
    pub books: FxHashMap<String, BookFixture>,
}

/// Book Fixture
#[derive(Debug, Deserialize)]
pub struct BookFixture {
    /// Book ISBN
    pub isbn: String,

    /// Book title
    pub title: String,

    /// Unit price (e.g., "8.00 GBP")
    pub price: String,
}

impl TryFrom<BookFixture> for Book<'_> {
    type Error = FixtureError;

    fn try_from(fixture: BookFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Book::new(
            fixture.isbn,
            fixture.title,
            Money::from_minor(minor_units, currency),
        ))
    }
}

/// Parse price string (e.g., "8.00 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        "JPY" => JPY,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
