//! Receipt
//!
//! Presentation of a [`Quote`]. This is the only place amounts are rounded to
//! the currency's minor units.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{discounts::percentage_points, pricing::Quote};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// An amount does not fit in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    AmountOutOfRange(Decimal),

    /// Money arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Round an exact amount to the currency's minor units, midpoint away from zero.
///
/// # Errors
///
/// Returns [`ReceiptError::AmountOutOfRange`] if the rounded amount overflows `i64` minor units.
pub fn to_money(amount: Decimal, currency: &Currency) -> Result<Money<'_, Currency>, ReceiptError> {
    let mut rounded =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(currency.exponent);

    let minor = i64::try_from(rounded.mantissa())
        .map_err(|_err| ReceiptError::AmountOutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// One printed line of a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine<'a> {
    /// Titles of the books on the line.
    pub titles: Vec<String>,

    /// Number of copies on the line.
    pub copies: usize,

    /// Price before discount.
    pub base_price: Money<'a, Currency>,

    /// Discount percentage points, if any applied.
    pub discount_points: Option<Decimal>,

    /// Price charged.
    pub price: Money<'a, Currency>,

    /// Free-text note (e.g. why a book was not charged).
    pub note: Option<String>,
}

/// Final receipt for a priced cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: Vec<ReceiptLine<'a>>,
    subtotal: Money<'a, Currency>,
    savings: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from a quote.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if an amount cannot be represented in minor units.
    pub fn from_quote(quote: &Quote<'a>) -> Result<Self, ReceiptError> {
        let currency = quote.currency();
        let mut lines = Vec::with_capacity(
            quote.groupings().len() + quote.full_price().len() + quote.removed().len(),
        );

        for grouping in quote.groupings() {
            let discounted = !grouping.discount().is_zero();

            lines.push(ReceiptLine {
                titles: grouping
                    .books()
                    .iter()
                    .map(|book| book.title().to_string())
                    .collect(),
                copies: grouping.len(),
                base_price: to_money(grouping.subtotal(), currency)?,
                discount_points: discounted.then(|| percentage_points(grouping.percentage())),
                price: to_money(grouping.total(), currency)?,
                note: None,
            });
        }

        for book in quote.full_price() {
            lines.push(ReceiptLine {
                titles: vec![book.title().to_string()],
                copies: 1,
                base_price: *book.price(),
                discount_points: None,
                price: *book.price(),
                note: None,
            });
        }

        for removed in quote.removed() {
            lines.push(ReceiptLine {
                titles: vec![removed.book.title().to_string()],
                copies: removed.copies,
                base_price: Money::from_minor(0, currency),
                discount_points: None,
                price: Money::from_minor(0, currency),
                note: Some(format!("{} not in series", removed.book.isbn())),
            });
        }

        let subtotal = to_money(quote.subtotal(), currency)?;
        let total = to_money(quote.total(), currency)?;

        Ok(Self {
            lines,
            subtotal,
            savings: subtotal.sub(total)?,
            total,
        })
    }

    /// Printed lines, groupings first.
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Rounded total before discounts.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Rounded subtotal less rounded total, so the summary always adds up.
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// Rounded total charged.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Books", "Copies", "Base Price", "Discount", "Price", "Note"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.titles.join("\n"),
                line.copies.to_string(),
                format!("{}", line.base_price),
                line.discount_points
                    .map(|points| format!("{points}%"))
                    .unwrap_or_default(),
                format!("{}", line.price),
                line.note.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..6), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Subtotal: {}", self.subtotal).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Savings:  {}", self.savings).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Total:    {}", self.total).map_err(|_err| ReceiptError::IO)?;

        Ok(())
    }
}
