//! Series Fixtures

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{discounts::SeriesDiscount, fixtures::FixtureError};

/// Series in YAML
#[derive(Debug, Deserialize)]
pub struct SeriesFixture {
    /// Ordered book key references
    pub books: Vec<String>,

    /// Optional discount table, group size -> percentage (e.g., `2: 5%`)
    #[serde(default)]
    pub discounts: Option<FxHashMap<usize, String>>,
}

impl SeriesFixture {
    /// Build the discount table, falling back to the standard tiers.
    ///
    /// # Errors
    ///
    /// Returns an error if a percentage cannot be parsed.
    pub fn discount(&self) -> Result<SeriesDiscount, FixtureError> {
        let Some(discounts) = &self.discounts else {
            return Ok(SeriesDiscount::default());
        };

        let tiers = discounts
            .iter()
            .map(|(size, percent)| Ok((*size, parse_percentage(percent)?)))
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(SeriesDiscount::new(tiers))
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
            / Decimal::ONE_HUNDRED
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
    };

    Ok(Percentage::from(value))
}
