//! # Aura Core Library
//!
//! The engine of the paper-trading desk.
//!
//! ## Modules
//! - `feed`: quote polling, synthetic pricing and the shared `PriceBoard`.
//! - `history`: rolling per-asset price windows.
//! - `synthetic`: the synthetic asset's price ramp.
//! - `ledger`: cash, holdings and cost basis under buy/sell.
//! - `fs`: directory layout and durable key-value stores.
//! - `config`: layered configuration.
//! - `args`: command-line arguments.

pub mod args;
pub mod config;
pub mod feed;
pub mod fs;
pub mod history;
pub mod ledger;
pub mod synthetic;

pub use config::{ConfigError, DeskConfig, FeedConfig, LedgerConfig, SyntheticConfig};
pub use feed::{FeedRunner, MarketState, PriceBoard, PriceFeed};
pub use history::PriceHistoryBuffer;
pub use ledger::{PortfolioLedger, PortfolioState};
pub use synthetic::SyntheticPriceModel;
