//! Pricing
//!
//! Totals are exact decimals in major currency units. Rounding to minor units
//! happens only when presenting a [`Quote`], see [`crate::receipt`].

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{
    books::Book,
    discounts::{SeriesDiscount, discount_on},
};

/// Sum of unit prices, without rounding.
pub fn subtotal<'b, 'a: 'b>(books: impl IntoIterator<Item = &'b Book<'a>>) -> Decimal {
    books.into_iter().map(Book::unit_price).sum()
}

/// A grouping of distinct series books with its discount applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedGrouping<'a> {
    books: Vec<Book<'a>>,
    subtotal: Decimal,
    percentage: Percentage,
    discount: Decimal,
}

impl<'a> PricedGrouping<'a> {
    /// Price a grouping of books under a discount table.
    ///
    /// The discount tier is chosen by the number of books in the grouping.
    pub fn new(books: Vec<Book<'a>>, discount: &SeriesDiscount) -> Self {
        let subtotal = subtotal(&books);
        let percentage = discount.discount_percentage(books.len());
        let discount = discount_on(subtotal, percentage);

        Self {
            books,
            subtotal,
            percentage,
            discount,
        }
    }

    /// Books in the grouping.
    pub fn books(&self) -> &[Book<'a>] {
        &self.books
    }

    /// Number of distinct books in the grouping.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the grouping is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Sum of unit prices before discount.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Discount percentage applied to the grouping.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Amount taken off the subtotal.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Subtotal less discount.
    pub fn total(&self) -> Decimal {
        self.subtotal - self.discount
    }
}

/// A book dropped from pricing because the active series does not know it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedBook<'a> {
    /// Representative copy of the dropped book.
    pub book: Book<'a>,

    /// Number of copies dropped.
    pub copies: usize,
}

/// Outcome of pricing a cart.
#[derive(Debug, Clone)]
pub struct Quote<'a> {
    groupings: Vec<PricedGrouping<'a>>,
    full_price: Vec<Book<'a>>,
    removed: Vec<RemovedBook<'a>>,
    total: Decimal,
    currency: &'a Currency,
}

impl<'a> Quote<'a> {
    /// Create a quote; the total is derived from the groupings and full price books.
    pub fn new(
        groupings: Vec<PricedGrouping<'a>>,
        full_price: Vec<Book<'a>>,
        removed: Vec<RemovedBook<'a>>,
        currency: &'a Currency,
    ) -> Self {
        let discounted: Decimal = groupings.iter().map(PricedGrouping::total).sum();
        let total = discounted + subtotal(&full_price);

        Self {
            groupings,
            full_price,
            removed,
            total,
            currency,
        }
    }

    /// Priced groupings, in partition order.
    pub fn groupings(&self) -> &[PricedGrouping<'a>] {
        &self.groupings
    }

    /// Copies charged at their unit price, outside any grouping.
    pub fn full_price(&self) -> &[Book<'a>] {
        &self.full_price
    }

    /// Books dropped from pricing.
    pub fn removed(&self) -> &[RemovedBook<'a>] {
        &self.removed
    }

    /// Total before discounts of everything that was priced.
    pub fn subtotal(&self) -> Decimal {
        self.groupings
            .iter()
            .map(PricedGrouping::subtotal)
            .sum::<Decimal>()
            + subtotal(&self.full_price)
    }

    /// Sum of all grouping discounts.
    pub fn savings(&self) -> Decimal {
        self.groupings.iter().map(PricedGrouping::discount).sum()
    }

    /// Unrounded total.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Currency of every price in the quote.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
