//! Core domain types and logic.

pub mod stock;
pub mod trade;
pub mod rounding;
pub mod trade_service;
pub mod stock_management;
pub mod error;
