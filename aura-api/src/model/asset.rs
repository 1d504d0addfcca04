//! Defines the closed set of tradable assets.
//!
//! The universe is fixed at compile time: six tokens tracked against the
//! external quote source and one synthetic token whose price is generated
//! locally.

use crate::error::UnknownAsset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tradable token symbol.
///
/// Declaration order is display order, and `Ord` follows it so that maps
/// keyed by `Asset` iterate the same way the desk renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Sol,
    Eth,
    Bnb,
    Ada,
    Doge,
    /// The synthetic token. Never quoted externally.
    Hulky,
}

impl Asset {
    /// Every asset, in display order.
    pub const ALL: [Asset; 7] = [
        Asset::Btc,
        Asset::Sol,
        Asset::Eth,
        Asset::Bnb,
        Asset::Ada,
        Asset::Doge,
        Asset::Hulky,
    ];

    /// The asset whose price comes from the local model.
    pub const SYNTHETIC: Asset = Asset::Hulky;

    /// Assets priced by the external quote source.
    pub fn market() -> impl Iterator<Item = Asset> {
        Self::ALL.into_iter().filter(|asset| !asset.is_synthetic())
    }

    pub fn is_synthetic(&self) -> bool {
        *self == Self::SYNTHETIC
    }

    /// The upper-case ticker symbol (e.g. "BTC").
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Sol => "SOL",
            Asset::Eth => "ETH",
            Asset::Bnb => "BNB",
            Asset::Ada => "ADA",
            Asset::Doge => "DOGE",
            Asset::Hulky => "HULKY",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Asset {
    type Err = UnknownAsset;

    /// Case-insensitive symbol lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|asset| asset.symbol().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownAsset(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("btc".parse::<Asset>().unwrap(), Asset::Btc);
        assert_eq!(" Doge ".parse::<Asset>().unwrap(), Asset::Doge);
        assert_eq!("HULKY".parse::<Asset>().unwrap(), Asset::Hulky);
    }

    #[test]
    fn test_parse_rejects_unknown_symbols() {
        let err = "BTCUSDT".parse::<Asset>().unwrap_err();
        assert_eq!(err, UnknownAsset("BTCUSDT".into()));
    }

    #[test]
    fn test_market_excludes_synthetic() {
        let market: Vec<Asset> = Asset::market().collect();
        assert_eq!(market.len(), 6);
        assert!(!market.contains(&Asset::SYNTHETIC));
    }

    #[test]
    fn test_serializes_as_symbol() {
        let json = serde_json::to_string(&Asset::Bnb).unwrap();
        assert_eq!(json, "\"BNB\"");
        let back: Asset = serde_json::from_str("\"ADA\"").unwrap();
        assert_eq!(back, Asset::Ada);
    }
}
