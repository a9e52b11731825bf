//! Trade store port trait.

use crate::domain::error::TickmillError;
use crate::domain::trade::Trade;

/// Append-only trade retention with a windowed read side.
pub trait TradeStore {
    fn save(&mut self, trade: Trade) -> Result<(), TickmillError>;

    /// All trades for `symbol` with `timestamp >= now - range_minutes`
    /// (inclusive lower bound), in insertion order.
    fn recent_trades_by_symbol(
        &self,
        symbol: &str,
        range_minutes: i64,
    ) -> Result<Vec<Trade>, TickmillError>;
}
