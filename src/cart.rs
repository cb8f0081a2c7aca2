//! Cart

use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    books::{Book, Isbn},
    diagnostics::{DiagnosticsSink, PricingEvent, TracingSink},
    partition::{Partition, partition, unknown_isbns},
    pricing::{PricedGrouping, Quote, RemovedBook},
    series::Series,
};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// No books were provided.
    #[error("shopping cart is empty")]
    Empty,

    /// A book's currency differs from the cart currency (index, book currency, cart currency).
    #[error("Book {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// A shopping cart of books, priced against an optional series.
///
/// Copies sharing an ISBN are assumed to share a title and price: the last
/// copy seen for an ISBN is its representative when pricing groupings.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    books: Vec<Book<'a>>,
    index: FxHashMap<Isbn, usize>,
    series: Series<'a>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create a cart holding the given books.
    ///
    /// # Errors
    ///
    /// - [`CartError::Empty`]: no books were provided.
    /// - [`CartError::CurrencyMismatch`]: the books are not all priced in one currency.
    pub fn new(books: impl Into<Vec<Book<'a>>>) -> Result<Self, CartError> {
        let books = books.into();

        let Some(first) = books.first() else {
            warn!("shopping cart is empty");

            return Err(CartError::Empty);
        };

        let currency = first.price().currency();

        books.iter().enumerate().try_for_each(|(i, book)| {
            let book_currency = book.price().currency();
            if book_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    book_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        let index: FxHashMap<Isbn, usize> = books
            .iter()
            .enumerate()
            .map(|(i, book)| (book.isbn().clone(), i))
            .collect();

        debug!(
            copies = books.len(),
            distinct = index.len(),
            currency = currency.iso_alpha_code,
            "created cart"
        );

        Ok(Self {
            books,
            index,
            series: Series::empty(),
            currency,
        })
    }

    /// Set the series used for discounts, replacing any previous one.
    ///
    /// An empty series turns discounts off.
    pub fn set_series(&mut self, series: impl Into<Series<'a>>) {
        self.series = series.into();

        debug!(books = self.series.len(), "set series");
    }

    /// The active series.
    pub fn series(&self) -> &Series<'a> {
        &self.series
    }

    /// Every copy in the cart, in the order given.
    pub fn books(&self) -> &[Book<'a>] {
        &self.books
    }

    /// Get the number of copies in the cart.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the cart is empty. A constructed cart never is.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// The representative copy for an ISBN, if the cart holds one.
    pub fn representative(&self, isbn: &Isbn) -> Option<&Book<'a>> {
        self.index.get(isbn).and_then(|i| self.books.get(*i))
    }

    /// Number of copies of an ISBN in the cart.
    pub fn copies(&self, isbn: &Isbn) -> usize {
        self.books.iter().filter(|book| book.isbn() == isbn).count()
    }

    /// Calculate the total price, discounts applied, without rounding.
    pub fn calculate_total_price(&self) -> Decimal {
        self.quote().total()
    }

    /// Price the cart, sending diagnostics to `tracing`.
    pub fn quote(&self) -> Quote<'a> {
        self.quote_with_sink(&mut TracingSink)
    }

    /// Price the cart, sending diagnostics to the given sink.
    ///
    /// With an empty series every copy is charged at its unit price. Otherwise
    /// books missing from the series are dropped (and reported), the remaining
    /// copies are partitioned into groupings of distinct series books, and each
    /// grouping is discounted according to its size.
    pub fn quote_with_sink<S>(&self, sink: &mut S) -> Quote<'a>
    where
        S: DiagnosticsSink + ?Sized,
    {
        let quote = if self.series.is_empty() {
            sink.record(&PricingEvent::NoSeries {
                copies: self.books.len(),
            });

            Quote::new(Vec::new(), self.books.clone(), Vec::new(), self.currency)
        } else {
            self.quote_series(sink)
        };

        sink.record(&PricingEvent::Priced {
            total: quote.total(),
        });

        quote
    }

    fn quote_series<S>(&self, sink: &mut S) -> Quote<'a>
    where
        S: DiagnosticsSink + ?Sized,
    {
        let unknown = unknown_isbns(&self.books, &self.series);
        let removed = self.remove_unknown(&unknown, sink);

        let excluded: FxHashSet<&Isbn> = unknown.iter().copied().collect();
        let kept = self
            .books
            .iter()
            .map(Book::isbn)
            .filter(|isbn| !excluded.contains(isbn));

        let series_isbns = self.series.isbns();
        let partition = partition(kept, &series_isbns);

        debug_assert!(
            partition.ungrouped().is_empty(),
            "series copies left ungrouped: {:?}",
            partition.ungrouped()
        );

        sink.record(&PricingEvent::Partitioned {
            max_copies: partition.max_copies(),
            groupings: partition
                .groupings()
                .iter()
                .map(|grouping| grouping.isbns().iter().map(|isbn| (*isbn).clone()).collect())
                .collect(),
        });

        let groupings = self.price_groupings(&partition, sink);

        Quote::new(groupings, Vec::new(), removed, self.currency)
    }

    fn remove_unknown<S>(&self, unknown: &[&Isbn], sink: &mut S) -> Vec<RemovedBook<'a>>
    where
        S: DiagnosticsSink + ?Sized,
    {
        unknown
            .iter()
            .filter_map(|isbn| self.representative(isbn))
            .map(|book| {
                let copies = self.copies(book.isbn());

                sink.record(&PricingEvent::UnknownItemRemoved {
                    isbn: book.isbn().clone(),
                    title: book.title().to_string(),
                    copies,
                });

                RemovedBook {
                    book: book.clone(),
                    copies,
                }
            })
            .collect()
    }

    fn price_groupings<S>(&self, partition: &Partition<'_>, sink: &mut S) -> Vec<PricedGrouping<'a>>
    where
        S: DiagnosticsSink + ?Sized,
    {
        partition
            .groupings()
            .iter()
            .map(|grouping| {
                let books: Vec<Book<'a>> = grouping
                    .isbns()
                    .iter()
                    .filter_map(|isbn| self.representative(isbn))
                    .cloned()
                    .collect();

                let priced = PricedGrouping::new(books, self.series.discount());

                sink.record(&PricingEvent::GroupingPriced {
                    titles: priced
                        .books()
                        .iter()
                        .map(|book| book.title().to_string())
                        .collect(),
                    subtotal: priced.subtotal(),
                    percentage: priced.percentage(),
                    discount: priced.discount(),
                });

                priced
            })
            .collect()
    }
}
