//! Concrete adapter implementations for ports.

pub mod memory_stock_source;
pub mod memory_trade_store;
pub mod csv_catalog_adapter;
pub mod file_config_adapter;
