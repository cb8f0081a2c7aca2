//! Pricing diagnostics
//!
//! The pricing path reports what it does through a [`DiagnosticsSink`]. Sinks
//! only observe: the price returned by a cart never depends on which sink (if
//! any) is attached.
//!
//! Book and cart creation happen before any sink is in reach, so those are
//! logged with `tracing` directly and never reach a sink.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{books::Isbn, discounts::percentage_points};

/// Something that happened while pricing a cart.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingEvent {
    /// No series is set, every copy is charged at its unit price.
    NoSeries {
        /// Number of copies priced.
        copies: usize,
    },

    /// A book absent from the series was dropped from the cart.
    ///
    /// Its price does not contribute to the total.
    UnknownItemRemoved {
        /// ISBN of the dropped book.
        isbn: Isbn,
        /// Title of the dropped book.
        title: String,
        /// Number of copies dropped.
        copies: usize,
    },

    /// The cart was split into groupings.
    Partitioned {
        /// Highest copy count of a single ISBN, and so the number of rounds.
        max_copies: usize,
        /// ISBNs of each grouping, in round order.
        groupings: Vec<Vec<Isbn>>,
    },

    /// One grouping was priced.
    GroupingPriced {
        /// Titles of the books in the grouping.
        titles: Vec<String>,
        /// Sum of unit prices before discount.
        subtotal: Decimal,
        /// Discount applied to the grouping.
        percentage: Percentage,
        /// Amount taken off the subtotal.
        discount: Decimal,
    },

    /// Pricing finished.
    Priced {
        /// Unrounded cart total.
        total: Decimal,
    },
}

/// Receives pricing diagnostics.
pub trait DiagnosticsSink {
    /// Record a single event.
    fn record(&mut self, event: &PricingEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn record(&mut self, _: &PricingEvent) {}
}

/// Sink that forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&mut self, event: &PricingEvent) {
        match event {
            PricingEvent::NoSeries { copies } => {
                debug!(copies, "no series set, no discounts applicable");
            }
            PricingEvent::UnknownItemRemoved {
                isbn,
                title,
                copies,
            } => {
                warn!(
                    %isbn,
                    %title,
                    copies,
                    "{title} ({isbn}) is not in the series and is priced at zero"
                );
            }
            PricingEvent::Partitioned {
                max_copies,
                groupings,
            } => {
                debug!(max_copies, ?groupings, "partitioned cart");
            }
            PricingEvent::GroupingPriced {
                titles,
                subtotal,
                percentage,
                discount,
            } => {
                debug!(
                    grouping = %format!("[{}]", titles.join(" + ")),
                    %subtotal,
                    percentage = %percentage_points(*percentage),
                    %discount,
                    "priced grouping"
                );
            }
            PricingEvent::Priced { total } => {
                debug!(%total, "priced cart");
            }
        }
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<PricingEvent>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[PricingEvent] {
        &self.events
    }
}

impl DiagnosticsSink for RecordingSink {
    fn record(&mut self, event: &PricingEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_events_in_order() {
        let mut sink = RecordingSink::new();

        sink.record(&PricingEvent::NoSeries { copies: 2 });
        sink.record(&PricingEvent::Priced {
            total: Decimal::new(1600, 2),
        });

        assert_eq!(sink.events().len(), 2);
        assert!(matches!(
            sink.events().first(),
            Some(PricingEvent::NoSeries { copies: 2 })
        ));
    }

    #[test]
    fn noop_and_tracing_sinks_accept_every_event() {
        let events = [
            PricingEvent::NoSeries { copies: 1 },
            PricingEvent::UnknownItemRemoved {
                isbn: Isbn::from("ISBN-UNKNOWN"),
                title: "XXXXXXXXX".to_string(),
                copies: 1,
            },
            PricingEvent::Partitioned {
                max_copies: 1,
                groupings: vec![vec![Isbn::from("ISBN-111")]],
            },
            PricingEvent::GroupingPriced {
                titles: vec!["Young Wizard - Series 1".to_string()],
                subtotal: Decimal::new(800, 2),
                percentage: Percentage::from(Decimal::ZERO),
                discount: Decimal::ZERO,
            },
            PricingEvent::Priced {
                total: Decimal::new(800, 2),
            },
        ];

        let mut noop = NoopSink;
        let mut tracing_sink = TracingSink;
        let sinks: [&mut dyn DiagnosticsSink; 2] = [&mut noop, &mut tracing_sink];

        for sink in sinks {
            for event in &events {
                sink.record(event);
            }
        }
    }
}
