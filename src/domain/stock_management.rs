//! Stock catalog ownership and valuation metrics.
//!
//! Owns the in-memory symbol → [`Stock`] map, mutates market prices in
//! place, computes dividend yield, P/E ratio and the geometric-mean index,
//! and mediates buy/sell requests by resolving the current market price and
//! delegating to [`TradeService`].

use chrono::Utc;
use std::collections::HashMap;

use super::error::TickmillError;
use super::rounding::round_dp;
use super::stock::{Stock, StockType};
use super::trade::TradeSide;
use super::trade_service::TradeService;
use crate::ports::stock_port::StockSource;

pub struct StockManagementService {
    stocks: HashMap<String, Stock>,
    trades: TradeService,
}

impl std::fmt::Debug for StockManagementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockManagementService")
            .field("stocks", &self.stocks)
            .finish_non_exhaustive()
    }
}

impl StockManagementService {
    /// Populate the catalog once from `source`. Symbols are unique and
    /// case-sensitive; a duplicate in the source is a catalog error.
    pub fn new(source: &dyn StockSource, trades: TradeService) -> Result<Self, TickmillError> {
        let mut stocks = HashMap::new();
        for stock in source.all_stocks()? {
            if stocks.insert(stock.symbol.clone(), stock).is_some() {
                return Err(TickmillError::Catalog {
                    reason: "duplicate symbol in stock source".into(),
                });
            }
        }
        Ok(StockManagementService { stocks, trades })
    }

    pub fn trade_service(&self) -> &TradeService {
        &self.trades
    }

    /// Catalog entries sorted by symbol, for display.
    pub fn stocks(&self) -> Vec<&Stock> {
        let mut all: Vec<&Stock> = self.stocks.values().collect();
        all.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        all
    }

    fn stock(&self, symbol: &str) -> Result<&Stock, TickmillError> {
        self.stocks.get(symbol).ok_or_else(|| {
            log::warn!("symbol '{symbol}' not supported");
            TickmillError::UnknownSymbol {
                symbol: symbol.to_string(),
            }
        })
    }

    fn fail(context: &str, cause: TickmillError) -> TickmillError {
        log::error!("{context}: {cause}");
        TickmillError::wrap(context, cause)
    }

    /// Set `symbol`'s market price in place. Prices must be strictly
    /// positive.
    pub fn update_market_price(&mut self, symbol: &str, price: f64) -> Result<(), TickmillError> {
        self.update_market_price_inner(symbol, price)
            .map_err(|e| Self::fail("failure updating market price", e))
    }

    fn update_market_price_inner(&mut self, symbol: &str, price: f64) -> Result<(), TickmillError> {
        if price <= 0.0 {
            return Err(TickmillError::invalid_argument(
                "price",
                "price cannot be zero or lower",
            ));
        }
        let stock = self.stocks.get_mut(symbol).ok_or_else(|| {
            log::warn!("symbol '{symbol}' not supported");
            TickmillError::UnknownSymbol {
                symbol: symbol.to_string(),
            }
        })?;
        stock.market_price = price;
        Ok(())
    }

    /// Dividend yield rounded to 2 decimal places: `last_dividend / price`
    /// for common stock, `(fixed_dividend · par_value) / price` for
    /// preferred.
    pub fn dividend_yield(&self, symbol: &str) -> Result<f64, TickmillError> {
        self.dividend_yield_inner(symbol)
            .map_err(|e| Self::fail("failure calculating the dividend yield", e))
    }

    fn dividend_yield_inner(&self, symbol: &str) -> Result<f64, TickmillError> {
        let stock = self.stock(symbol)?;

        if stock.market_price <= 0.0 {
            return Err(TickmillError::ZeroMarketPrice {
                symbol: symbol.to_string(),
            });
        }

        let yield_value = match stock.stock_type {
            StockType::Common => stock.last_dividend / stock.market_price,
            StockType::Preferred => {
                let fixed = stock.fixed_dividend.ok_or_else(|| {
                    TickmillError::MissingFixedDividend {
                        symbol: symbol.to_string(),
                    }
                })?;
                (fixed * stock.par_value) / stock.market_price
            }
        };

        Ok(round_dp(yield_value, 2))
    }

    /// P/E ratio rounded to 1 decimal place: `market_price / last_dividend`.
    pub fn pe_ratio(&self, symbol: &str) -> Result<f64, TickmillError> {
        self.pe_ratio_inner(symbol)
            .map_err(|e| Self::fail("failure calculating the P/E ratio", e))
    }

    fn pe_ratio_inner(&self, symbol: &str) -> Result<f64, TickmillError> {
        let stock = self.stock(symbol)?;

        if stock.last_dividend == 0.0 {
            return Err(TickmillError::ZeroLastDividend);
        }

        Ok(round_dp(stock.market_price / stock.last_dividend, 1))
    }

    /// Geometric mean of the market prices of all stocks priced above
    /// zero, rounded to 2 decimal places. Stocks priced at zero are
    /// skipped, not treated as zero-valued contributors.
    pub fn index_price(&self) -> Result<f64, TickmillError> {
        self.index_price_inner()
            .map_err(|e| Self::fail("failure calculating the index price", e))
    }

    fn index_price_inner(&self) -> Result<f64, TickmillError> {
        let mut log_sum = 0.0;
        let mut count = 0u32;

        for stock in self.stocks.values() {
            if stock.market_price <= 0.0 {
                continue;
            }
            log_sum += stock.market_price.ln();
            count += 1;
        }

        if count == 0 {
            return Err(TickmillError::NoEligibleStocks);
        }

        Ok(round_dp((log_sum / f64::from(count)).exp(), 2))
    }

    /// Buy `quantity` of `symbol` at its current market price, timestamped
    /// now.
    pub fn buy_at_current_price(&mut self, symbol: &str, quantity: i64) -> Result<(), TickmillError> {
        self.trade_at_current_price(symbol, quantity, TradeSide::Buy)
            .map_err(|e| Self::fail("failure buying at current market price", e))
    }

    /// Sell `quantity` of `symbol` at its current market price, timestamped
    /// now.
    pub fn sell_at_current_price(&mut self, symbol: &str, quantity: i64) -> Result<(), TickmillError> {
        self.trade_at_current_price(symbol, quantity, TradeSide::Sell)
            .map_err(|e| Self::fail("failure selling at current market price", e))
    }

    // Shared path so buy and sell run the same argument checks.
    fn trade_at_current_price(
        &mut self,
        symbol: &str,
        quantity: i64,
        side: TradeSide,
    ) -> Result<(), TickmillError> {
        if symbol.trim().is_empty() {
            return Err(TickmillError::invalid_argument(
                "symbol",
                "provide a valid symbol string",
            ));
        }

        if quantity <= 0 {
            return Err(TickmillError::invalid_argument(
                "quantity",
                "quantity cannot be zero or lower",
            ));
        }

        let stock = self.stock(symbol)?.clone();
        let price = stock.market_price;
        let now = Utc::now();

        match side {
            TradeSide::Buy => self.trades.buy(&stock, price, quantity, now),
            TradeSide::Sell => self.trades.sell(&stock, price, quantity, now),
        }
    }
}
