//! Books

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::debug;

/// Identifier shared by every copy of the same book.
///
/// Check digits are not validated; any string is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Isbn(String);

impl Isbn {
    /// Creates a new identifier.
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Isbn {
    fn from(isbn: &str) -> Self {
        Self::new(isbn)
    }
}

impl From<String> for Isbn {
    fn from(isbn: String) -> Self {
        Self(isbn)
    }
}

/// A priced, identified book.
///
/// Two books with the same [`Isbn`] are interchangeable copies.
#[derive(Clone, Debug, PartialEq)]
pub struct Book<'a> {
    isbn: Isbn,
    title: String,
    price: Money<'a, Currency>,
}

impl<'a> Book<'a> {
    /// Creates a new book with the given ISBN, title and unit price.
    pub fn new(
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        let isbn = isbn.into();
        let title = title.into();

        debug!(%isbn, %title, %price, "created book");

        Self { isbn, title, price }
    }

    /// Returns the ISBN of the book
    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    /// Returns the title of the book
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the unit price of the book
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the unit price as an exact decimal in major units (e.g. `8.00`).
    pub fn unit_price(&self) -> Decimal {
        Decimal::new(self.price.to_minor_units(), self.price.currency().exponent)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, JPY};

    use super::*;

    #[test]
    fn book_accessors_return_constructor_values() {
        let book = Book::new("ISBN-111", "Young Wizard - Series 1", Money::from_minor(800, GBP));

        assert_eq!(book.isbn().as_str(), "ISBN-111");
        assert_eq!(book.title(), "Young Wizard - Series 1");
        assert_eq!(book.price(), &Money::from_minor(800, GBP));
    }

    #[test]
    fn unit_price_uses_currency_exponent() {
        let pounds = Book::new("ISBN-111", "Pounds", Money::from_minor(799, GBP));
        let yen = Book::new("ISBN-222", "Yen", Money::from_minor(799, JPY));

        assert_eq!(pounds.unit_price(), Decimal::new(799, 2));
        assert_eq!(yen.unit_price(), Decimal::new(799, 0));
    }

    #[test]
    fn isbn_conversions_agree() {
        let from_str = Isbn::from("ISBN-111");
        let from_string = Isbn::from(String::from("ISBN-111"));

        assert_eq!(from_str, from_string);
        assert_eq!(from_str.to_string(), "ISBN-111");
    }
}
