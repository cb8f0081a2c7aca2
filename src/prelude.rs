//! Shelf prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    books::{Book, Isbn},
    cart::{Cart, CartError},
    diagnostics::{DiagnosticsSink, NoopSink, PricingEvent, RecordingSink, TracingSink},
    discounts::SeriesDiscount,
    fixtures::{Fixture, FixtureError},
    partition::{Grouping, Partition},
    pricing::{PricedGrouping, Quote, RemovedBook},
    receipt::{Receipt, ReceiptError},
    series::Series,
};
