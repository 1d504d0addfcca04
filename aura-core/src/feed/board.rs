use crate::history::PriceHistoryBuffer;
use aura::{Asset, PriceSnapshot};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// Everything the feed publishes after a poll.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketState {
    pub snapshot: PriceSnapshot,
    pub history: PriceHistoryBuffer,
    /// When the quote source last answered successfully.
    pub quoted_at: Option<DateTime<Utc>>,
}

impl MarketState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            snapshot: PriceSnapshot::default(),
            history: PriceHistoryBuffer::new(history_capacity),
            quoted_at: None,
        }
    }

    /// Sets the latest price and appends it to the asset's history.
    pub fn record(&mut self, asset: Asset, price: f64) {
        self.snapshot.set(asset, price);
        self.history.append(asset, price);
    }
}

/// Shared, observable market state.
///
/// The feed is the only writer and always swaps in a complete `MarketState`,
/// so readers never observe a half-applied poll.
#[derive(Debug, Clone)]
pub struct PriceBoard {
    state: Arc<RwLock<MarketState>>,
}

impl PriceBoard {
    pub fn new(history_capacity: usize) -> Self {
        Self::from_state(MarketState::new(history_capacity))
    }

    pub fn from_state(state: MarketState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// A copy of the whole market state.
    pub fn state(&self) -> MarketState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A copy of the latest prices.
    pub fn snapshot(&self) -> PriceSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    pub fn price(&self, asset: Asset) -> f64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .price(asset)
    }

    /// The asset's recent samples, oldest first.
    pub fn history(&self, asset: Asset) -> Vec<f64> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .history
            .to_vec(asset)
    }

    /// Replaces the market state wholesale.
    pub fn publish(&self, next: MarketState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
