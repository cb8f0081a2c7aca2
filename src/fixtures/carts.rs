//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for carts in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Book key references, one per copy
    pub books: Vec<String>,
}
