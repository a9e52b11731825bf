//! Stock source port trait.

use crate::domain::error::TickmillError;
use crate::domain::stock::Stock;

/// Supplies the full set of known stocks. Called once, at catalog
/// construction; no later additions or removals are supported.
pub trait StockSource {
    fn all_stocks(&self) -> Result<Vec<Stock>, TickmillError>;
}
