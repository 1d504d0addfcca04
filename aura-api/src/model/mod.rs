pub mod asset;
pub mod market_data;
pub mod trade;
