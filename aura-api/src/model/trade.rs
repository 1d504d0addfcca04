use crate::model::asset::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// Receipt of an executed paper trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub asset: Asset,
    pub side: Side,
    /// Asset units bought or sold.
    pub quantity: f64,
    /// The live price the trade executed at.
    pub price: f64,
    /// Cash moved by the trade (always non-negative).
    pub notional: f64,
}
