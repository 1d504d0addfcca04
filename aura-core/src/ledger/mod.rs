//! The paper account: cash, holdings and cost basis under buy/sell.
//!
//! Trades execute synchronously at the price found in the snapshot handed in
//! at call time. Every mutation is written through to the key-value store;
//! store failures are logged and otherwise ignored.

pub mod state;

pub use state::PortfolioState;

use crate::config::LedgerConfig;
use aura::{Asset, Fill, KeyValueStore, PriceSnapshot, Rejection, Side, TradeError};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const CASH_KEY: &str = "aura_cash";
pub const HOLDINGS_KEY: &str = "aura_holdings";
pub const INVESTED_KEY: &str = "aura_invested";

pub struct PortfolioLedger {
    state: PortfolioState,
    store: Box<dyn KeyValueStore>,
}

impl PortfolioLedger {
    /// Restores the account from `store`.
    ///
    /// Each key falls back to its default on its own when missing or
    /// unreadable: `starting_cash` for cash, zero for every holding and cost
    /// basis.
    pub fn open(store: Box<dyn KeyValueStore>, config: &LedgerConfig) -> Self {
        let cash = restore::<f64>(store.as_ref(), CASH_KEY)
            .filter(|cash| cash.is_finite() && *cash >= 0.0)
            .unwrap_or_else(|| config.starting_cash());
        let holdings = restore_amounts(store.as_ref(), HOLDINGS_KEY);
        let invested = restore_amounts(store.as_ref(), INVESTED_KEY);

        let state = PortfolioState::restore(cash, holdings, invested);
        info!(
            "Ledger opened: cash {:.2}, cost basis {:.2}",
            state.cash(),
            state.total_cost()
        );

        Self { state, store }
    }

    pub fn state(&self) -> &PortfolioState {
        &self.state
    }

    pub fn cash(&self) -> f64 {
        self.state.cash()
    }

    pub fn holdings(&self, asset: Asset) -> f64 {
        self.state.holdings(asset)
    }

    pub fn invested(&self, asset: Asset) -> f64 {
        self.state.invested(asset)
    }

    pub fn equity(&self, prices: &PriceSnapshot) -> f64 {
        self.state.equity(prices)
    }

    pub fn net_worth(&self, prices: &PriceSnapshot) -> f64 {
        self.state.net_worth(prices)
    }

    pub fn unrealized_pnl(&self, asset: Asset, prices: &PriceSnapshot) -> f64 {
        self.state.unrealized_pnl(asset, prices)
    }

    pub fn total_cost(&self) -> f64 {
        self.state.total_cost()
    }

    /// Spends `spend` cash on `asset` at its current price.
    ///
    /// Adds to any existing position: quantity and cost basis accumulate.
    pub fn buy(
        &mut self,
        asset: Asset,
        spend: f64,
        prices: &PriceSnapshot,
    ) -> Result<Fill, TradeError> {
        // NaN fails this comparison too
        if !(spend > 0.0) {
            return Err(TradeError::invalid(asset, Rejection::NonPositiveAmount));
        }
        let price = prices.price(asset);
        if !(price > 0.0) {
            return Err(TradeError::invalid(asset, Rejection::PriceUnavailable));
        }
        if self.state.cash() < spend {
            return Err(TradeError::invalid(
                asset,
                Rejection::InsufficientCash {
                    requested: spend,
                    available: self.state.cash(),
                },
            ));
        }

        let quantity = spend / price;
        self.state.open(asset, spend, quantity);
        self.persist();

        info!("BUY {} {:.8} @ {} for {:.2}", asset, quantity, price, spend);
        Ok(Fill {
            asset,
            side: Side::Buy,
            quantity,
            price,
            notional: spend,
        })
    }

    /// Sells the whole position in `asset` at its current price.
    ///
    /// There is no partial sell. The position is closed even if no price is
    /// known yet, in which case it is liquidated for nothing.
    pub fn sell(&mut self, asset: Asset, prices: &PriceSnapshot) -> Result<Fill, TradeError> {
        let quantity = self.state.holdings(asset);
        if !(quantity > 0.0) {
            return Err(TradeError::invalid(asset, Rejection::NoHoldings));
        }

        let price = prices.price(asset);
        let proceeds = quantity * price;
        self.state.liquidate(asset, proceeds);
        self.persist();

        info!("SELL {} {:.8} @ {} for {:.2}", asset, quantity, price, proceeds);
        Ok(Fill {
            asset,
            side: Side::Sell,
            quantity,
            price,
            notional: proceeds,
        })
    }

    /// Adds `amount` to the cash balance, unconditionally.
    ///
    /// # Returns
    ///
    /// The new cash balance.
    pub fn refill(&mut self, amount: f64) -> f64 {
        self.state.credit(amount);
        self.persist();
        info!("Cash refilled by {:.2}, balance {:.2}", amount, self.state.cash());
        self.state.cash()
    }

    /// Hands the store back, e.g. to reopen a ledger over the same data.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    fn persist(&mut self) {
        write(self.store.as_mut(), CASH_KEY, &self.state.cash());
        write(self.store.as_mut(), HOLDINGS_KEY, self.state.holdings_map());
        write(self.store.as_mut(), INVESTED_KEY, self.state.invested_map());
    }
}

fn restore<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.load(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Ignoring corrupt '{}' snapshot: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Could not read '{}', using default: {}", key, e);
            None
        }
    }
}

/// Reads a symbol-keyed amount map entry by entry, so one bad entry only
/// costs that entry: unknown symbols are dropped, non-numbers read as zero.
fn restore_amounts(store: &dyn KeyValueStore, key: &str) -> BTreeMap<Asset, f64> {
    let Some(entries) = restore::<Map<String, Value>>(store, key) else {
        return BTreeMap::new();
    };

    entries
        .into_iter()
        .filter_map(|(symbol, amount)| match symbol.parse::<Asset>() {
            Ok(asset) => Some((asset, amount.as_f64().unwrap_or(0.0))),
            Err(e) => {
                warn!("Dropping '{}' entry from '{}': {}", symbol, key, e);
                None
            }
        })
        .collect()
}

fn write<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_value(value)
        .map_err(|e| e.to_string())
        .and_then(|json| store.save(key, &json).map_err(|e| e.to_string()));
    if let Err(e) = result {
        warn!("Failed to persist '{}': {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryStore;
    use aura::PersistenceError;
    use serde_json::json;

    const EPSILON: f64 = 1e-9;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
            Err(PersistenceError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn save(&mut self, key: &str, _: &Value) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }
    }

    fn fresh() -> PortfolioLedger {
        PortfolioLedger::open(Box::new(MemoryStore::new()), &LedgerConfig::default())
    }

    fn prices(entries: &[(Asset, f64)]) -> PriceSnapshot {
        let mut snapshot = PriceSnapshot::default();
        for (asset, price) in entries {
            snapshot.set(*asset, *price);
        }
        snapshot
    }

    #[test]
    fn test_buy_price_move_sell_walkthrough() {
        let mut ledger = fresh();

        let fill = ledger
            .buy(Asset::Btc, 1_000.0, &prices(&[(Asset::Btc, 50_000.0)]))
            .unwrap();
        assert_eq!(fill.side, Side::Buy);
        assert!((ledger.holdings(Asset::Btc) - 0.02).abs() < EPSILON);
        assert_eq!(ledger.invested(Asset::Btc), 1_000.0);
        assert_eq!(ledger.cash(), 9_000.0);

        let moved = prices(&[(Asset::Btc, 60_000.0)]);
        assert!((ledger.unrealized_pnl(Asset::Btc, &moved) - 200.0).abs() < EPSILON);

        let fill = ledger.sell(Asset::Btc, &moved).unwrap();
        assert!((fill.notional - 1_200.0).abs() < EPSILON);
        assert!((ledger.cash() - 10_200.0).abs() < EPSILON);
        assert_eq!(ledger.holdings(Asset::Btc), 0.0);
        assert_eq!(ledger.invested(Asset::Btc), 0.0);
    }

    #[test]
    fn test_rejected_buys_do_not_mutate() {
        let mut ledger = fresh();
        let snapshot = prices(&[(Asset::Eth, 3_000.0)]);
        let before = ledger.state().clone();

        for spend in [0.0, -5.0, f64::NAN, 10_000.01] {
            assert!(ledger.buy(Asset::Eth, spend, &snapshot).is_err());
        }
        let err = ledger.buy(Asset::Sol, 100.0, &snapshot).unwrap_err();

        assert_eq!(err.reason(), Rejection::PriceUnavailable);
        assert_eq!(ledger.state(), &before);
    }

    #[test]
    fn test_buy_whole_balance_is_allowed() {
        let mut ledger = fresh();
        ledger
            .buy(Asset::Ada, 10_000.0, &prices(&[(Asset::Ada, 0.5)]))
            .unwrap();
        assert_eq!(ledger.cash(), 0.0);
        assert_eq!(ledger.holdings(Asset::Ada), 20_000.0);
    }

    #[test]
    fn test_repeated_buys_accumulate() {
        let mut ledger = fresh();
        let spends = [(100.0, 50.0), (250.0, 40.0), (75.0, 60.0)];
        let mut expected_qty = 0.0;

        for (spend, price) in spends {
            ledger
                .buy(Asset::Sol, spend, &prices(&[(Asset::Sol, price)]))
                .unwrap();
            expected_qty += spend / price;
        }

        assert!((ledger.invested(Asset::Sol) - 425.0).abs() < EPSILON);
        assert!((ledger.holdings(Asset::Sol) - expected_qty).abs() < EPSILON);
        assert!((ledger.cash() - 9_575.0).abs() < EPSILON);
    }

    #[test]
    fn test_sell_without_holdings_is_rejected() {
        let mut ledger = fresh();
        let err = ledger
            .sell(Asset::Doge, &prices(&[(Asset::Doge, 0.1)]))
            .unwrap_err();
        assert_eq!(
            err,
            TradeError::InvalidTrade {
                asset: Asset::Doge,
                reason: Rejection::NoHoldings
            }
        );
        assert_eq!(ledger.cash(), 10_000.0);
    }

    #[test]
    fn test_sell_at_unknown_price_zeroes_position() {
        let mut ledger = fresh();
        ledger
            .buy(Asset::Bnb, 600.0, &prices(&[(Asset::Bnb, 600.0)]))
            .unwrap();

        let fill = ledger.sell(Asset::Bnb, &PriceSnapshot::default()).unwrap();

        assert_eq!(fill.notional, 0.0);
        assert_eq!(ledger.cash(), 9_400.0);
        assert_eq!(ledger.holdings(Asset::Bnb), 0.0);
        assert_eq!(ledger.invested(Asset::Bnb), 0.0);
    }

    #[test]
    fn test_full_liquidation_leaves_only_cash() {
        let mut ledger = fresh();
        let mut snapshot = prices(&[
            (Asset::Btc, 50_000.0),
            (Asset::Eth, 3_000.0),
            (Asset::Doge, 0.1234),
            (Asset::Hulky, 0.00042),
        ]);
        for (asset, spend) in [
            (Asset::Btc, 1_234.56),
            (Asset::Eth, 777.7),
            (Asset::Doge, 333.33),
            (Asset::Hulky, 1_000.0),
        ] {
            ledger.buy(asset, spend, &snapshot).unwrap();
        }

        snapshot.set(Asset::Btc, 51_234.5);
        snapshot.set(Asset::Hulky, 0.0009);
        let worth = ledger.net_worth(&snapshot);

        for asset in Asset::ALL {
            let _ = ledger.sell(asset, &snapshot);
        }

        assert_eq!(ledger.equity(&snapshot), 0.0);
        assert_eq!(ledger.net_worth(&snapshot), ledger.cash());
        assert_eq!(ledger.total_cost(), 0.0);
        assert!((ledger.cash() - worth).abs() < 1e-6);
    }

    #[test]
    fn test_refill_adds_to_balance() {
        let mut ledger = fresh();
        ledger
            .buy(Asset::Eth, 4_000.0, &prices(&[(Asset::Eth, 2_000.0)]))
            .unwrap();

        assert_eq!(ledger.refill(10_000.0), 16_000.0);
        assert_eq!(ledger.holdings(Asset::Eth), 2.0);
    }

    #[test]
    fn test_mutations_are_written_through() {
        let mut ledger = fresh();
        ledger
            .buy(Asset::Btc, 1_000.0, &prices(&[(Asset::Btc, 50_000.0)]))
            .unwrap();
        let store = ledger.into_store();

        assert_eq!(store.load(CASH_KEY).unwrap(), Some(json!(9_000.0)));
        let holdings = store.load(HOLDINGS_KEY).unwrap().unwrap();
        assert_eq!(holdings["BTC"], json!(0.02));
        assert_eq!(holdings["ETH"], json!(0.0));
        let invested = store.load(INVESTED_KEY).unwrap().unwrap();
        assert_eq!(invested["BTC"], json!(1_000.0));
    }

    #[test]
    fn test_reopen_restores_previous_session() {
        let mut ledger = fresh();
        ledger
            .buy(Asset::Sol, 300.0, &prices(&[(Asset::Sol, 150.0)]))
            .unwrap();
        ledger.refill(500.0);
        let before = ledger.state().clone();

        let reopened = PortfolioLedger::open(ledger.into_store(), &LedgerConfig::default());

        assert_eq!(reopened.state(), &before);
    }

    #[test]
    fn test_corrupt_keys_fall_back_independently() {
        let store = MemoryStore::new()
            .with_entry(CASH_KEY, json!("ten thousand"))
            .with_entry(HOLDINGS_KEY, json!({"BTC": 0.5, "ETH": 2.0}))
            .with_entry(INVESTED_KEY, json!([1, 2, 3]));

        let ledger = PortfolioLedger::open(Box::new(store), &LedgerConfig::default());

        assert_eq!(ledger.cash(), 10_000.0);
        assert_eq!(ledger.holdings(Asset::Btc), 0.5);
        assert_eq!(ledger.holdings(Asset::Eth), 2.0);
        assert_eq!(ledger.holdings(Asset::Doge), 0.0);
        assert_eq!(ledger.total_cost(), 0.0);
    }

    #[test]
    fn test_bad_entries_only_cost_themselves() {
        let store = MemoryStore::new()
            .with_entry(HOLDINGS_KEY, json!({"BTC": 0.5, "ETH": null, "SOL": "lots"}))
            .with_entry(INVESTED_KEY, json!({"BTC": 20_000.0, "XRP": 5.0}));

        let ledger = PortfolioLedger::open(Box::new(store), &LedgerConfig::default());

        assert_eq!(ledger.holdings(Asset::Btc), 0.5);
        assert_eq!(ledger.invested(Asset::Btc), 20_000.0);
        assert_eq!(ledger.holdings(Asset::Eth), 0.0);
        assert_eq!(ledger.holdings(Asset::Sol), 0.0);
        assert_eq!(ledger.total_cost(), 20_000.0);
    }

    #[test]
    fn test_negative_cash_snapshot_is_rejected() {
        let store = MemoryStore::new().with_entry(CASH_KEY, json!(-50.0));
        let ledger = PortfolioLedger::open(Box::new(store), &LedgerConfig::default());
        assert_eq!(ledger.cash(), 10_000.0);
    }

    #[test]
    fn test_broken_store_never_blocks_trading() {
        let config = LedgerConfig::new(2_500.0, 1_000.0, 100.0);
        let mut ledger = PortfolioLedger::open(Box::new(BrokenStore), &config);
        assert_eq!(ledger.cash(), 2_500.0);

        ledger
            .buy(Asset::Eth, 1_000.0, &prices(&[(Asset::Eth, 2_000.0)]))
            .unwrap();
        ledger.refill(config.refill_amount());

        assert_eq!(ledger.cash(), 2_500.0);
        assert_eq!(ledger.holdings(Asset::Eth), 0.5);
    }
}
