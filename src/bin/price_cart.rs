//! Price Cart
//!
//! Prices a fixture cart against its series and prints a receipt.
//!
//! Use `-f` to pick the fixture set, `--no-series` to skip discounts.

use std::io;

use anyhow::Result;
use clap::Parser;
use shelf::{
    fixtures::Fixture,
    receipt::Receipt,
    utils::{PriceCartArgs, init_logging},
};
use tracing::info;

fn main() -> Result<()> {
    let args = PriceCartArgs::parse();

    init_logging(&args.logging)?;

    let fixture = Fixture::from_set_in(&args.fixtures, &args.fixture)?;
    let mut cart = fixture.cart()?;

    if !args.no_series {
        cart.set_series(fixture.series().clone());
    }

    let quote = cart.quote();

    info!(fixture = %args.fixture, total = %quote.total(), "priced cart");

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::from_quote(&quote)?.write_to(&mut handle)?;

    Ok(())
}
