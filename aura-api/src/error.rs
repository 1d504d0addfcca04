use crate::model::asset::Asset;
use thiserror::Error;

/// A symbol outside the supported asset universe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown asset '{0}'")]
pub struct UnknownAsset(pub String);

/// Failure of a single poll against the quote source.
///
/// Always recovered locally: the feed keeps its last snapshot and retries on
/// the next tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The request never produced a response (DNS, connect, timeout...).
    #[error("Quote source unreachable: {0}")]
    Transport(String),

    /// The quote source answered with a non-success HTTP status.
    #[error("Quote source answered with status {0}")]
    Status(u16),

    /// The body could not be read as a list of tickers.
    #[error("Malformed quote response: {0}")]
    Malformed(String),
}

/// Why a trade was refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Spend amount is zero, negative or not a number.
    NonPositiveAmount,
    /// No positive price is known for the asset yet.
    PriceUnavailable,
    /// Spend amount exceeds the cash balance.
    InsufficientCash { requested: f64, available: f64 },
    /// Nothing to sell.
    NoHoldings,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NonPositiveAmount => f.write_str("amount must be positive"),
            Rejection::PriceUnavailable => f.write_str("no live price yet"),
            Rejection::InsufficientCash {
                requested,
                available,
            } => write!(f, "requested {requested:.2} but only {available:.2} cash available"),
            Rejection::NoHoldings => f.write_str("no holdings to sell"),
        }
    }
}

/// A trade precondition violation. No state is mutated when this is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Invalid trade on {asset}: {reason}")]
    InvalidTrade { asset: Asset, reason: Rejection },
}

impl TradeError {
    pub fn invalid(asset: Asset, reason: Rejection) -> Self {
        TradeError::InvalidTrade { asset, reason }
    }

    pub fn reason(&self) -> Rejection {
        match self {
            TradeError::InvalidTrade { reason, .. } => *reason,
        }
    }
}

/// Durable store read/write failure.
///
/// Never fatal: reads fall back to defaults, failed writes only mean the next
/// session may miss the latest state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Underlying IO failure on the given key.
    #[error("IO error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored value is not valid JSON or does not have the expected shape.
    #[error("Corrupt value under '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
