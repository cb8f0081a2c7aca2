//! Series

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::{
    books::{Book, Isbn},
    discounts::SeriesDiscount,
};

/// The curated, ordered set of books eligible for combination discounts.
///
/// An empty series means no discounts apply at all.
#[derive(Debug, Clone, Default)]
pub struct Series<'a> {
    books: Vec<Book<'a>>,
    discount: SeriesDiscount,
}

impl<'a> Series<'a> {
    /// Create a series with the standard discount table.
    pub fn new(books: impl Into<Vec<Book<'a>>>) -> Self {
        Self::with_discount(books, SeriesDiscount::default())
    }

    /// Create a series with a custom discount table.
    pub fn with_discount(books: impl Into<Vec<Book<'a>>>, discount: SeriesDiscount) -> Self {
        Self {
            books: books.into(),
            discount,
        }
    }

    /// Create an empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Books in the series, in order.
    pub fn books(&self) -> &[Book<'a>] {
        &self.books
    }

    /// The discount table for this series.
    pub fn discount(&self) -> &SeriesDiscount {
        &self.discount
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Get the number of books in the series.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Distinct ISBNs in series order, first occurrence wins.
    pub fn isbns(&self) -> SmallVec<[&Isbn; 8]> {
        let mut seen = FxHashSet::default();

        self.books
            .iter()
            .map(Book::isbn)
            .filter(|isbn| seen.insert(*isbn))
            .collect()
    }
}

impl<'a> From<Vec<Book<'a>>> for Series<'a> {
    fn from(books: Vec<Book<'a>>) -> Self {
        Self::new(books)
    }
}

impl<'a> From<&[Book<'a>]> for Series<'a> {
    fn from(books: &[Book<'a>]) -> Self {
        Self::new(books.to_vec())
    }
}

impl<'a, const N: usize> From<[Book<'a>; N]> for Series<'a> {
    fn from(books: [Book<'a>; N]) -> Self {
        Self::new(books)
    }
}

/// A missing series is treated as an empty one.
impl<'a> From<Option<Vec<Book<'a>>>> for Series<'a> {
    fn from(books: Option<Vec<Book<'a>>>) -> Self {
        books.map(Self::new).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};

    use super::*;

    fn book(isbn: &str) -> Book<'static> {
        Book::new(isbn, format!("Title {isbn}"), Money::from_minor(800, GBP))
    }

    #[test]
    fn isbns_are_deduplicated_in_order() {
        let series = Series::new(vec![book("B"), book("A"), book("B"), book("C")]);

        let isbns: Vec<&str> = series.isbns().into_iter().map(Isbn::as_str).collect();

        assert_eq!(isbns, vec!["B", "A", "C"]);
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn missing_series_is_empty() {
        let series = Series::from(None::<Vec<Book<'_>>>);

        assert!(series.is_empty());
        assert!(series.isbns().is_empty());
    }

    #[test]
    fn new_series_uses_standard_discount() {
        let series = Series::from(Some(vec![book("A")]));

        assert_eq!(series.discount(), &SeriesDiscount::default());
    }
}
