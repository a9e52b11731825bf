//! Stock record for one tradeable instrument.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockType {
    Common,
    Preferred,
}

impl fmt::Display for StockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockType::Common => write!(f, "Common"),
            StockType::Preferred => write!(f, "Preferred"),
        }
    }
}

/// One catalog entry. Constructed once at catalog load time; `market_price`
/// is the only field mutated afterwards, in place, by the owning service.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub symbol: String,
    pub stock_type: StockType,
    pub market_price: f64,
    pub last_dividend: f64,
    /// Dividend fraction, set only for preferred stocks. The preferred
    /// yield calculation requires it.
    pub fixed_dividend: Option<f64>,
    pub par_value: f64,
}

impl Stock {
    pub fn common(symbol: &str, last_dividend: f64, par_value: f64) -> Self {
        Stock {
            symbol: symbol.to_string(),
            stock_type: StockType::Common,
            market_price: 0.0,
            last_dividend,
            fixed_dividend: None,
            par_value,
        }
    }

    pub fn preferred(symbol: &str, last_dividend: f64, fixed_dividend: f64, par_value: f64) -> Self {
        Stock {
            symbol: symbol.to_string(),
            stock_type: StockType::Preferred,
            market_price: 0.0,
            last_dividend,
            fixed_dividend: Some(fixed_dividend),
            par_value,
        }
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Type: {} | Market Price: {:.2}",
            self.symbol, self.stock_type, self.market_price
        )
    }
}
