//! Rolling per-asset price history.
//!
//! Only feeds the desk's trend lines; the ledger never reads it.

use aura::Asset;
use std::collections::{BTreeMap, VecDeque};

/// Default number of samples kept per asset.
pub const DEFAULT_HISTORY_CAPACITY: usize = 40;

/// Fixed-capacity FIFO window of the most recent samples for every asset.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistoryBuffer {
    capacity: usize,
    series: BTreeMap<Asset, VecDeque<f64>>,
}

impl Default for PriceHistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl PriceHistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let series = Asset::ALL
            .into_iter()
            .map(|asset| (asset, VecDeque::new()))
            .collect();
        Self { capacity, series }
    }

    /// Appends `sample` to the asset's window, evicting the oldest samples
    /// until the window is back at capacity.
    pub fn append(&mut self, asset: Asset, sample: f64) {
        let window = self.series.entry(asset).or_default();
        window.push_back(sample);
        while window.len() > self.capacity {
            window.pop_front();
        }
    }

    /// Samples for `asset`, oldest first.
    pub fn to_vec(&self, asset: Asset) -> Vec<f64> {
        self.series
            .get(&asset)
            .map(|window| window.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, asset: Asset) -> usize {
        self.series.get(&asset).map(VecDeque::len).unwrap_or(0)
    }

    pub fn is_empty(&self, asset: Asset) -> bool {
        self.len(asset) == 0
    }
}
