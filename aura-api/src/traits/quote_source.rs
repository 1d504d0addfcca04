//! Defines the `QuoteSource` trait for external price ingestion.
//!
//! A quote source is polled periodically by the price feed. It abstracts over
//! the concrete exchange endpoint (or a test stub) while handing back a
//! uniform list of raw `Quote`s.

use crate::error::FeedError;
use crate::model::market_data::Quote;
use async_trait::async_trait;

/// A read-only source of symbol/price pairs.
///
/// # Examples
///
/// ```
/// use aura::{FeedError, Quote, QuoteSource};
///
/// struct Fixed;
///
/// #[async_trait::async_trait]
/// impl QuoteSource for Fixed {
///     async fn fetch_quotes(&self) -> Result<Vec<Quote>, FeedError> {
///         Ok(vec![Quote::new("BTCUSDT", "50000.0")])
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Issues one read against the source.
    ///
    /// The returned list may cover many more instruments than the desk
    /// tracks; filtering is left to the caller.
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, FeedError>;
}

#[async_trait]
impl QuoteSource for Box<dyn QuoteSource> {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, FeedError> {
        (**self).fetch_quotes().await
    }
}
