//! Price feed: one poll = one read of the quote source, one recomputation of
//! the synthetic price, one published `MarketState`.
//!
//! A failed read leaves every market asset exactly as it was; the synthetic
//! asset is updated regardless since it needs nothing external.

pub mod binance;
pub mod board;
pub mod runner;

pub use binance::BinanceQuoteSource;
pub use board::{MarketState, PriceBoard};
pub use runner::FeedRunner;

use crate::synthetic::SyntheticPriceModel;
use aura::{Asset, FeedError, Quote, QuoteSource};
use chrono::Utc;
use log::debug;

pub struct PriceFeed<S> {
    source: S,
    board: PriceBoard,
    synthetic: SyntheticPriceModel,
    quote_currency: String,
}

impl<S: QuoteSource> PriceFeed<S> {
    /// Creates a feed publishing to `board`.
    ///
    /// The synthetic asset is priced right away (without jitter) so it can be
    /// traded before the first poll completes.
    pub fn new(
        source: S,
        board: PriceBoard,
        synthetic: SyntheticPriceModel,
        quote_currency: impl Into<String>,
    ) -> Self {
        let mut state = board.state();
        state
            .snapshot
            .set(Asset::SYNTHETIC, synthetic.price_at(Utc::now(), 0.0));
        board.publish(state);

        Self {
            source,
            board,
            synthetic,
            quote_currency: quote_currency.into().to_ascii_uppercase(),
        }
    }

    pub fn board(&self) -> &PriceBoard {
        &self.board
    }

    /// Runs one poll.
    ///
    /// # Returns
    ///
    /// * `Ok(n)` with the number of market prices taken from the response.
    /// * `Err` if the quote source could not be read. The synthetic price has
    ///   still been updated in that case.
    pub async fn poll(&mut self) -> Result<usize, FeedError> {
        let fetched = self.source.fetch_quotes().await;
        let now = Utc::now();

        let mut next = self.board.state();
        let outcome = fetched.map(|quotes| {
            next.quoted_at = Some(now);
            self.apply_quotes(&mut next, &quotes)
        });

        let synthetic = self.synthetic.sample(now, &mut rand::thread_rng());
        next.record(Asset::SYNTHETIC, synthetic);

        self.board.publish(next);
        outcome
    }

    fn apply_quotes(&self, state: &mut MarketState, quotes: &[Quote]) -> usize {
        let mut applied = 0;
        for quote in quotes {
            let Some(asset) = normalize_symbol(&quote.symbol, &self.quote_currency) else {
                continue;
            };
            match parse_price(&quote.price) {
                Some(price) => {
                    state.record(asset, price);
                    applied += 1;
                }
                None => debug!("Unusable price {:?} for {}, skipping", quote.price, quote.symbol),
            }
        }
        applied
    }
}

/// Maps an exchange symbol to a market-tracked asset.
///
/// The symbol must end with `quote_currency` (e.g. "BTCUSDT" -> BTC). Other
/// quote currencies, unknown bases and the synthetic symbol yield `None`.
pub fn normalize_symbol(symbol: &str, quote_currency: &str) -> Option<Asset> {
    let symbol = symbol.trim().to_ascii_uppercase();
    let base = symbol.strip_suffix(quote_currency)?;
    base.parse::<Asset>()
        .ok()
        .filter(|asset| !asset.is_synthetic())
}

/// Parses a decimal price string. Rejects negatives, NaN and infinities.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}
