//! Trade recording and volume-weighted price calculation.

use chrono::{DateTime, Utc};

use super::error::TickmillError;
use super::rounding::round_dp;
use super::stock::Stock;
use super::trade::{Trade, TradeSide};
use crate::ports::trade_port::TradeStore;

/// Records validated trades against a [`TradeStore`] and answers VWAP
/// queries over a trailing time window.
pub struct TradeService {
    store: Box<dyn TradeStore>,
}

impl TradeService {
    pub fn new(store: Box<dyn TradeStore>) -> Self {
        TradeService { store }
    }

    pub fn buy(
        &mut self,
        stock: &Stock,
        price: f64,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), TickmillError> {
        self.record(Trade::new(TradeSide::Buy, stock.clone(), price, quantity, timestamp))
    }

    pub fn sell(
        &mut self,
        stock: &Stock,
        price: f64,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), TickmillError> {
        self.record(Trade::new(TradeSide::Sell, stock.clone(), price, quantity, timestamp))
    }

    fn record(&mut self, trade: Trade) -> Result<(), TickmillError> {
        let result = trade.validate().and_then(|()| self.store.save(trade));
        result.map_err(|e| {
            log::error!("failure recording trade: {e}");
            TickmillError::wrap("failure recording trade", e)
        })
    }

    /// `Σ(price·quantity) / Σ(quantity)` over all trades for `symbol`
    /// within the trailing window, rounded to 2 decimal places.
    pub fn volume_weighted_price(
        &self,
        symbol: &str,
        range_minutes: i64,
    ) -> Result<f64, TickmillError> {
        self.volume_weighted_price_inner(symbol, range_minutes)
            .map_err(|e| {
                log::error!("failure calculating volume weighted stock price: {e}");
                TickmillError::wrap("failure calculating volume weighted stock price", e)
            })
    }

    fn volume_weighted_price_inner(
        &self,
        symbol: &str,
        range_minutes: i64,
    ) -> Result<f64, TickmillError> {
        let trades = self.store.recent_trades_by_symbol(symbol, range_minutes)?;

        let mut total_price = 0.0;
        let mut total_quantity: i64 = 0;

        for trade in &trades {
            total_price += trade.price * trade.quantity as f64;
            total_quantity += trade.quantity;
        }

        if total_quantity == 0 {
            return Err(TickmillError::NoTradesInRange {
                symbol: symbol.to_string(),
                range_minutes,
            });
        }

        Ok(round_dp(total_price / total_quantity as f64, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_trade_store::MemoryTradeStore;
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn sample_stock(symbol: &str, price: f64) -> Stock {
        let mut stock = Stock::common(symbol, 8.0, 100.0);
        stock.market_price = price;
        stock
    }

    fn service_with_trades(trades: Vec<Trade>) -> TradeService {
        TradeService::new(Box::new(MemoryTradeStore::with_trades(trades)))
    }

    fn trade(symbol: &str, price: f64, quantity: i64, minutes_ago: i64) -> Trade {
        Trade::new(
            TradeSide::Buy,
            sample_stock(symbol, price),
            price,
            quantity,
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[test]
    fn buy_records_valid_trade() {
        let mut service = service_with_trades(Vec::new());
        let stock = sample_stock("POP", 100.0);
        service.buy(&stock, 100.0, 5, Utc::now()).unwrap();

        let vwap = service.volume_weighted_price("POP", 15).unwrap();
        assert_relative_eq!(vwap, 100.0);
    }

    #[test]
    fn sell_records_valid_trade() {
        let mut service = service_with_trades(Vec::new());
        let stock = sample_stock("GIN", 87.0);
        service.sell(&stock, 87.0, 1, Utc::now()).unwrap();

        let vwap = service.volume_weighted_price("GIN", 15).unwrap();
        assert_relative_eq!(vwap, 87.0);
    }

    #[test]
    fn invalid_trade_is_wrapped_with_cause() {
        let mut service = service_with_trades(Vec::new());
        let stock = sample_stock("POP", 100.0);
        let err = service.buy(&stock, 0.0, 5, Utc::now()).unwrap_err();

        assert_eq!(err.to_string(), "failure recording trade");
        assert_eq!(
            err.root_cause().to_string(),
            "invalid trade: price not above zero on trade"
        );
    }

    #[test]
    fn vwap_weights_by_quantity() {
        let service = service_with_trades(vec![
            trade("POP", 100.0, 5, 1),
            trade("POP", 101.0, 5, 1),
        ]);
        let vwap = service.volume_weighted_price("POP", 15).unwrap();
        assert_relative_eq!(vwap, 100.5);
    }

    #[test]
    fn vwap_ignores_trades_outside_window() {
        let service = service_with_trades(vec![
            trade("ABC", 55.0, 10, 1),
            trade("ABC", 55.0, 10, 2),
            trade("ABC", 45.0, 20, 3),
            trade("ABC", 55.0, 10, 60),
        ]);
        // (55*10 + 55*10 + 45*20) / 40 = 2000 / 40 = 50
        let vwap = service.volume_weighted_price("ABC", 15).unwrap();
        assert_relative_eq!(vwap, 50.0);
    }

    #[test]
    fn vwap_ignores_other_symbols() {
        let service = service_with_trades(vec![
            trade("POP", 100.0, 5, 1),
            trade("ALE", 175.0, 6, 1),
        ]);
        let vwap = service.volume_weighted_price("POP", 15).unwrap();
        assert_relative_eq!(vwap, 100.0);
    }

    #[test]
    fn empty_window_is_explicit_error() {
        let service = service_with_trades(vec![trade("POP", 100.0, 5, 60)]);
        let err = service.volume_weighted_price("POP", 15).unwrap_err();

        assert_eq!(
            err.to_string(),
            "failure calculating volume weighted stock price"
        );
        assert!(matches!(
            err.root_cause(),
            TickmillError::NoTradesInRange { range_minutes: 15, .. }
        ));
    }
}
