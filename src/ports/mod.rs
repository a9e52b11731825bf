//! Port traits for the system's collaborators.

pub mod stock_port;
pub mod trade_port;
pub mod config_port;
