//! CSV catalog adapter.
//!
//! Loads a stock catalog from a CSV file with the header
//! `symbol,type,market_price,last_dividend,fixed_dividend,par_value`.
//! `type` is `common` or `preferred`; `fixed_dividend` may be left empty
//! for common stocks.

use std::fs;
use std::path::PathBuf;

use crate::domain::error::TickmillError;
use crate::domain::stock::{Stock, StockType};
use crate::ports::stock_port::StockSource;

pub struct CsvCatalogAdapter {
    path: PathBuf,
}

impl CsvCatalogAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse_field<T: std::str::FromStr>(
        record: &csv::StringRecord,
        index: usize,
        name: &str,
    ) -> Result<T, TickmillError>
    where
        T::Err: std::fmt::Display,
    {
        record
            .get(index)
            .ok_or_else(|| TickmillError::Catalog {
                reason: format!("missing {name} column"),
            })?
            .trim()
            .parse()
            .map_err(|e| TickmillError::Catalog {
                reason: format!("invalid {name} value: {e}"),
            })
    }
}

impl StockSource for CsvCatalogAdapter {
    fn all_stocks(&self) -> Result<Vec<Stock>, TickmillError> {
        let content = fs::read_to_string(&self.path).map_err(|e| TickmillError::Catalog {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut stocks = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TickmillError::Catalog {
                reason: format!("CSV parse error: {e}"),
            })?;

            let symbol = record
                .get(0)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| TickmillError::Catalog {
                    reason: "missing symbol column".into(),
                })?
                .to_string();

            let stock_type = match record.get(1).map(str::trim) {
                Some("common") => StockType::Common,
                Some("preferred") => StockType::Preferred,
                Some(other) => {
                    return Err(TickmillError::Catalog {
                        reason: format!("invalid type value '{other}' for {symbol}"),
                    });
                }
                None => {
                    return Err(TickmillError::Catalog {
                        reason: "missing type column".into(),
                    });
                }
            };

            let market_price: f64 = Self::parse_field(&record, 2, "market_price")?;
            let last_dividend: f64 = Self::parse_field(&record, 3, "last_dividend")?;

            let fixed_dividend = match record.get(4).map(str::trim) {
                None | Some("") => None,
                Some(raw) => Some(raw.parse::<f64>().map_err(|e| TickmillError::Catalog {
                    reason: format!("invalid fixed_dividend value: {e}"),
                })?),
            };

            let par_value: f64 = Self::parse_field(&record, 5, "par_value")?;

            if market_price < 0.0 || last_dividend < 0.0 {
                return Err(TickmillError::Catalog {
                    reason: format!("negative price fields for {symbol}"),
                });
            }

            if stock_type == StockType::Preferred && fixed_dividend.is_none() {
                return Err(TickmillError::Catalog {
                    reason: format!("preferred stock {symbol} requires a fixed_dividend"),
                });
            }

            stocks.push(Stock {
                symbol,
                stock_type,
                market_price,
                last_dividend,
                fixed_dividend,
                par_value,
            });
        }

        Ok(stocks)
    }
}
