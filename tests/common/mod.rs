#![allow(dead_code)]

use chrono::{Duration, Utc};
use std::cell::RefCell;
use std::rc::Rc;

use tickmill::domain::error::TickmillError;
use tickmill::domain::stock::Stock;
use tickmill::domain::stock_management::StockManagementService;
use tickmill::domain::trade::{Trade, TradeSide};
use tickmill::domain::trade_service::TradeService;
use tickmill::adapters::memory_stock_source::MemoryStockSource;
use tickmill::ports::trade_port::TradeStore;

/// Trade store double that exposes its saved trades through a shared
/// handle and can be told to reject writes.
pub struct MockTradeStore {
    saved: Rc<RefCell<Vec<Trade>>>,
    fail_save: Option<String>,
}

impl MockTradeStore {
    pub fn new() -> (Self, Rc<RefCell<Vec<Trade>>>) {
        let saved = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                saved: Rc::clone(&saved),
                fail_save: None,
            },
            saved,
        )
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            saved: Rc::new(RefCell::new(Vec::new())),
            fail_save: Some(reason.to_string()),
        }
    }
}

impl TradeStore for MockTradeStore {
    fn save(&mut self, trade: Trade) -> Result<(), TickmillError> {
        if let Some(reason) = &self.fail_save {
            return Err(TickmillError::Io(std::io::Error::other(reason.clone())));
        }
        self.saved.borrow_mut().push(trade);
        Ok(())
    }

    fn recent_trades_by_symbol(
        &self,
        symbol: &str,
        range_minutes: i64,
    ) -> Result<Vec<Trade>, TickmillError> {
        let cutoff = Utc::now() - Duration::minutes(range_minutes);
        Ok(self
            .saved
            .borrow()
            .iter()
            .filter(|t| t.symbol() == Some(symbol) && t.timestamp >= cutoff)
            .cloned()
            .collect())
    }
}

pub fn priced_stock(symbol: &str, price: f64) -> Stock {
    let mut stock = Stock::common(symbol, 8.0, 100.0);
    stock.market_price = price;
    stock
}

pub fn trade_minutes_ago(symbol: &str, price: f64, quantity: i64, minutes: i64) -> Trade {
    Trade::new(
        TradeSide::Buy,
        priced_stock(symbol, price),
        price,
        quantity,
        Utc::now() - Duration::minutes(minutes),
    )
}

/// Service over the reference catalog with a given trade store.
pub fn reference_service(store: Box<dyn TradeStore>) -> StockManagementService {
    let source = MemoryStockSource::reference_catalog();
    let trades = TradeService::new(store);
    StockManagementService::new(&source, trades).expect("reference catalog is valid")
}
