//! Market Data models.
//!
//! Includes `Quote` for raw entries handed over by a quote source and
//! `PriceSnapshot` for the latest known price of every asset.

use crate::model::asset::Asset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw symbol/price pair as returned by a quote source.
///
/// Both fields are kept verbatim; normalisation and numeric parsing are the
/// feed's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The exchange symbol, usually suffixed with the quote currency (e.g. "BTCUSDT").
    pub symbol: String,
    /// The decimal price string (e.g. "50000.01").
    pub price: String,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
        }
    }
}

/// The latest known price per asset.
///
/// Every asset of the universe always has an entry; `0.0` means no price has
/// been observed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    prices: BTreeMap<Asset, f64>,
}

impl Default for PriceSnapshot {
    fn default() -> Self {
        Self {
            prices: Asset::ALL.into_iter().map(|asset| (asset, 0.0)).collect(),
        }
    }
}

impl PriceSnapshot {
    /// Returns the last price for `asset`, or `0.0` when none is known.
    pub fn price(&self, asset: Asset) -> f64 {
        self.prices.get(&asset).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, asset: Asset, price: f64) {
        self.prices.insert(asset, price);
    }

    /// True once a strictly positive price is known for `asset`.
    pub fn is_priced(&self, asset: Asset) -> bool {
        self.price(asset) > 0.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Asset, f64)> + '_ {
        self.prices.iter().map(|(asset, price)| (*asset, *price))
    }
}
