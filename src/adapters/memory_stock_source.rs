//! List-backed stock source.
//!
//! A real deployment would back this with persistent storage; for this
//! application an in-memory list is the only implementation in scope.

use crate::domain::error::TickmillError;
use crate::domain::stock::Stock;
use crate::ports::stock_port::StockSource;

pub struct MemoryStockSource {
    stocks: Vec<Stock>,
}

impl MemoryStockSource {
    pub fn new(stocks: Vec<Stock>) -> Self {
        MemoryStockSource { stocks }
    }

    /// The five-stock sample catalog used by the demo harness.
    pub fn reference_catalog() -> Self {
        MemoryStockSource::new(vec![
            Stock::common("TEA", 0.0, 100.0),
            Stock::common("POP", 8.0, 100.0),
            Stock::common("ALE", 23.0, 60.0),
            Stock::preferred("GIN", 8.0, 0.02, 100.0),
            Stock::common("JOE", 13.0, 250.0),
        ])
    }
}

impl StockSource for MemoryStockSource {
    fn all_stocks(&self) -> Result<Vec<Stock>, TickmillError> {
        Ok(self.stocks.clone())
    }
}
