use aura::{Asset, PriceSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn zeroed() -> BTreeMap<Asset, f64> {
    Asset::ALL.into_iter().map(|asset| (asset, 0.0)).collect()
}

/// Cash, holdings and cost basis of the paper account.
///
/// Mutated only by `PortfolioLedger`. Every query here is a pure function of
/// the state and the snapshot passed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioState {
    cash: f64,
    /// Asset units held.
    holdings: BTreeMap<Asset, f64>,
    /// Currency spent on the currently open position of each asset.
    invested: BTreeMap<Asset, f64>,
}

impl PortfolioState {
    /// Fresh account: `cash` and nothing else.
    pub fn new(cash: f64) -> Self {
        Self {
            cash,
            holdings: zeroed(),
            invested: zeroed(),
        }
    }

    /// Rebuilds a state from persisted parts, repairing what cannot hold:
    /// missing assets become zero, negative or non-finite amounts become zero,
    /// and cost basis is dropped wherever nothing is held.
    pub(crate) fn restore(
        cash: f64,
        holdings: BTreeMap<Asset, f64>,
        invested: BTreeMap<Asset, f64>,
    ) -> Self {
        let sane = |value: Option<&f64>| match value {
            Some(v) if v.is_finite() && *v > 0.0 => *v,
            _ => 0.0,
        };

        let mut state = Self::new(cash);
        for asset in Asset::ALL {
            let held = sane(holdings.get(&asset));
            state.holdings.insert(asset, held);
            let basis = if held > 0.0 {
                sane(invested.get(&asset))
            } else {
                0.0
            };
            state.invested.insert(asset, basis);
        }
        state
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn holdings(&self, asset: Asset) -> f64 {
        self.holdings.get(&asset).copied().unwrap_or(0.0)
    }

    pub fn invested(&self, asset: Asset) -> f64 {
        self.invested.get(&asset).copied().unwrap_or(0.0)
    }

    pub fn holdings_map(&self) -> &BTreeMap<Asset, f64> {
        &self.holdings
    }

    pub fn invested_map(&self) -> &BTreeMap<Asset, f64> {
        &self.invested
    }

    /// Mark-to-market value of all holdings. Cash is not included.
    pub fn equity(&self, prices: &PriceSnapshot) -> f64 {
        self.holdings
            .iter()
            .map(|(asset, quantity)| quantity * prices.price(*asset))
            .sum()
    }

    /// Cash plus equity.
    pub fn net_worth(&self, prices: &PriceSnapshot) -> f64 {
        self.cash + self.equity(prices)
    }

    /// Current value of the position minus what was paid for it.
    ///
    /// Reads as `-invested` while no price is known for the asset.
    pub fn unrealized_pnl(&self, asset: Asset, prices: &PriceSnapshot) -> f64 {
        self.holdings(asset) * prices.price(asset) - self.invested(asset)
    }

    /// Cost basis across all open positions, independent of prices.
    pub fn total_cost(&self) -> f64 {
        self.invested.values().sum()
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.cash += amount;
    }

    pub(crate) fn open(&mut self, asset: Asset, spend: f64, quantity: f64) {
        self.cash -= spend;
        *self.invested.entry(asset).or_insert(0.0) += spend;
        *self.holdings.entry(asset).or_insert(0.0) += quantity;
    }

    pub(crate) fn liquidate(&mut self, asset: Asset, proceeds: f64) {
        self.cash += proceeds;
        self.holdings.insert(asset, 0.0);
        self.invested.insert(asset, 0.0);
    }
}
