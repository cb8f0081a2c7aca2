//! Fixtures
//!
//! YAML fixture sets. A set named `name` is made of three files under the base
//! path: `catalog/name.yml`, `series/name.yml` and `carts/name.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    books::Book,
    cart::{Cart, CartError},
    fixtures::{carts::CartFixture, catalog::CatalogFixture, series::SeriesFixture},
    series::Series,
};

pub mod carts;
pub mod catalog;
pub mod series;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Book not found in the catalog
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Currency mismatch between books
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Book key -> book
    books: FxHashMap<String, Book<'a>>,

    /// Series built from the series file
    series: Series<'a>,

    /// One entry per copy in the cart file
    cart: Vec<Book<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            books: FxHashMap::default(),
            series: Series::empty(),
            cart: Vec::new(),
            currency: None,
        }
    }

    /// Load books from a YAML catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("catalog", name)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        for (key, book_fixture) in fixture.books {
            let book: Book<'static> = book_fixture.try_into()?;
            let currency = book.price().currency();

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.books.insert(key, book);
        }

        Ok(self)
    }

    /// Load the series from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced books don't exist.
    pub fn load_series(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("series", name)?;
        let fixture: SeriesFixture = serde_norway::from_str(&contents)?;

        let books = self.resolve(&fixture.books)?;
        self.series = Series::with_discount(books, fixture.discount()?);

        Ok(self)
    }

    /// Load the cart contents from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced books don't exist.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("carts", name)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        self.cart = self.resolve(&fixture.books)?;

        Ok(self)
    }

    /// Load a complete fixture set (catalog, series and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_catalog(name)?
            .load_series(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Get a book by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the book is not found.
    pub fn book(&self, key: &str) -> Result<&Book<'a>, FixtureError> {
        self.books
            .get(key)
            .ok_or_else(|| FixtureError::BookNotFound(key.to_string()))
    }

    /// Get the loaded series
    pub fn series(&self) -> &Series<'a> {
        &self.series
    }

    /// Get the loaded cart contents
    pub fn books_in_cart(&self) -> &[Book<'a>] {
        &self.cart
    }

    /// Create a cart from the loaded cart contents, with no series set
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        Ok(Cart::new(self.cart.clone())?)
    }

    /// Get the currency
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        Ok(fs::read_to_string(file_path)?)
    }

    fn resolve(&self, keys: &[String]) -> Result<Vec<Book<'a>>, FixtureError> {
        keys.iter().map(|key| self.book(key).cloned()).collect()
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rust_decimal::Decimal;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const CATALOG: &str = "books:
  one:
    isbn: ISBN-1
    title: One
    price: 8.00 GBP
  two:
    isbn: ISBN-2
    title: Two
    price: 8.00 GBP
";

    #[test]
    fn fixture_loads_catalog_series_and_cart() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "catalog", "pair", CATALOG)?;
        write_fixture(dir.path(), "series", "pair", "books: [one, two]\n")?;
        write_fixture(dir.path(), "carts", "pair", "books: [one, two, one]\n")?;

        let fixture = Fixture::from_set_in(dir.path(), "pair")?;

        assert_eq!(fixture.book("one")?.isbn().as_str(), "ISBN-1");
        assert_eq!(fixture.series().len(), 2);
        assert_eq!(fixture.books_in_cart().len(), 3);
        assert_eq!(fixture.currency(), Some(GBP));

        let mut cart = fixture.cart()?;
        cart.set_series(fixture.series().clone());

        // [one, two] at 5% off, then [one] at full price.
        assert_eq!(cart.calculate_total_price(), Decimal::new(2320, 2));

        Ok(())
    }

    #[test]
    fn unknown_book_key_is_an_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "catalog", "bad", CATALOG)?;
        write_fixture(dir.path(), "series", "bad", "books: [one, three]\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_catalog("bad")?.load_series("bad").map(|_| ());

        assert!(matches!(result, Err(FixtureError::BookNotFound(key)) if key == "three"));

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "catalog",
            "mixed",
            "books:
  one:
    isbn: A
    title: A
    price: 1.00 GBP
  two:
    isbn: B
    title: B
    price: 1.00 USD
",
        )?;

        let result = Fixture::with_base_path(dir.path())
            .load_catalog("mixed")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn invalid_price_stops_catalog_before_currency_is_set() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "catalog",
            "broken",
            "books:
  one:
    isbn: A
    title: A
    price: 1.00GBP
",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_catalog("broken").map(|_| ());

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
        assert_eq!(fixture.currency(), None);

        Ok(())
    }

    #[test]
    fn empty_cart_fixture_cannot_build_a_cart() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "catalog", "empty", CATALOG)?;
        write_fixture(dir.path(), "series", "empty", "books: []\n")?;
        write_fixture(dir.path(), "carts", "empty", "books: []\n")?;

        let fixture = Fixture::from_set_in(dir.path(), "empty")?;

        assert!(matches!(
            fixture.cart(),
            Err(FixtureError::Cart(CartError::Empty))
        ));

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Fixture::from_set_in("./does-not-exist", "nothing");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
