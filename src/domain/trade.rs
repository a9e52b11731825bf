//! Trade record and its pre-persistence validation.

use chrono::{DateTime, Utc};
use std::fmt;

use super::error::TickmillError;
use super::stock::Stock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "Buy"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

/// One executed buy/sell event. Created transiently per trade call,
/// validated, then handed to the trade store for append-only retention;
/// never mutated after creation.
///
/// `stock` is a snapshot of the catalog entry at execution time. It is
/// optional so that an unpopulated trade is expressible and caught by
/// [`Trade::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub timestamp: DateTime<Utc>,
    pub side: TradeSide,
    pub stock: Option<Stock>,
    pub price: f64,
    pub quantity: i64,
}

impl Trade {
    pub fn new(
        side: TradeSide,
        stock: Stock,
        price: f64,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Trade {
            timestamp,
            side,
            stock: Some(stock),
            price,
            quantity,
        }
    }

    /// Symbol of the traded stock, if the snapshot is present.
    pub fn symbol(&self) -> Option<&str> {
        self.stock.as_ref().map(|s| s.symbol.as_str())
    }

    /// Single-pass ordered check; the first failing condition determines
    /// the error. Order: stock snapshot present, symbol non-blank, price
    /// positive, quantity positive.
    pub fn validate(&self) -> Result<(), TickmillError> {
        let stock = self.stock.as_ref().ok_or_else(|| TickmillError::InvalidTrade {
            reason: "stock information on trade not a valid object".into(),
        })?;

        if stock.symbol.trim().is_empty() {
            return Err(TickmillError::InvalidTrade {
                reason: "symbol not a valid string on trade".into(),
            });
        }

        if self.price <= 0.0 {
            return Err(TickmillError::InvalidTrade {
                reason: "price not above zero on trade".into(),
            });
        }

        if self.quantity <= 0 {
            return Err(TickmillError::InvalidTrade {
                reason: "quantity not above zero on trade".into(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Stock: {} | Price: {:.2} | Quantity: {} | Timestamp: {}",
            self.side,
            self.symbol().unwrap_or("?"),
            self.price,
            self.quantity,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
