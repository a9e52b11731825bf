//! List-backed trade store with a trailing-window read side.

use chrono::{Duration, Utc};

use crate::domain::error::TickmillError;
use crate::domain::trade::Trade;
use crate::ports::trade_port::TradeStore;

pub struct MemoryTradeStore {
    trades: Vec<Trade>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        MemoryTradeStore { trades: Vec::new() }
    }

    pub fn with_trades(trades: Vec<Trade>) -> Self {
        MemoryTradeStore { trades }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl Default for MemoryTradeStore {
    fn default() -> Self {
        MemoryTradeStore::new()
    }
}

impl TradeStore for MemoryTradeStore {
    fn save(&mut self, trade: Trade) -> Result<(), TickmillError> {
        self.trades.push(trade);
        Ok(())
    }

    fn recent_trades_by_symbol(
        &self,
        symbol: &str,
        range_minutes: i64,
    ) -> Result<Vec<Trade>, TickmillError> {
        if symbol.trim().is_empty() {
            return Err(TickmillError::invalid_argument(
                "symbol",
                "provide a valid symbol string",
            ));
        }

        let cutoff = Utc::now() - Duration::minutes(range_minutes);

        Ok(self
            .trades
            .iter()
            .filter(|trade| trade.symbol() == Some(symbol) && trade.timestamp >= cutoff)
            .cloned()
            .collect())
    }
}
