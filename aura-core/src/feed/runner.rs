use super::PriceFeed;
use aura::QuoteSource;
use log::{info, warn};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Drives a `PriceFeed` on a fixed period until stopped.
///
/// Polls never overlap: the next tick is only awaited once the previous poll
/// has finished, and ticks missed meanwhile are skipped rather than replayed.
pub struct FeedRunner {
    handle: Option<JoinHandle<u64>>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl FeedRunner {
    /// Spawns the polling task on the current tokio runtime. The first poll
    /// fires immediately.
    pub fn spawn<S>(mut feed: PriceFeed<S>, period: Duration) -> Self
    where
        S: QuoteSource + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut polls = 0u64;

            info!("Feed runner started. Polling every {:?}", period);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        info!("Feed runner received stop signal.");
                        break;
                    }
                    _ = ticker.tick() => {
                        polls += 1;
                        if let Err(e) = feed.poll().await {
                            warn!("Price update failed, keeping last prices: {}", e);
                        }
                    }
                }
            }

            polls
        });

        Self {
            handle: Some(handle),
            stop_tx: Some(stop_tx),
        }
    }

    /// Stops scheduling polls and waits for the task to wind down. An
    /// in-flight poll is allowed to complete.
    ///
    /// # Returns
    ///
    /// The number of polls started over the runner's lifetime.
    pub async fn shutdown(mut self) -> u64 {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                warn!("Feed runner ended abnormally: {}", e);
                0
            }),
            None => 0,
        }
    }
}

impl Drop for FeedRunner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::PriceBoard;
    use crate::synthetic::SyntheticPriceModel;
    use async_trait::async_trait;
    use aura::{Asset, FeedError, Quote};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl QuoteSource for CountingSource {
        async fn fetch_quotes(&self) -> Result<Vec<Quote>, FeedError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n % 2 == 0 {
                Ok(vec![Quote::new("BTCUSDT", format!("{}", 50_000 + n))])
            } else {
                Err(FeedError::Status(503))
            }
        }
    }

    #[tokio::test]
    async fn test_runner_polls_until_shutdown() {
        let calls = Arc::new(AtomicUsize::new(0));
        let board = PriceBoard::new(40);
        let model = SyntheticPriceModel::new(
            Utc::now(),
            chrono::Duration::days(30),
            0.0001,
            0.10,
            0.0,
        );
        let feed = PriceFeed::new(
            CountingSource {
                calls: calls.clone(),
            },
            board.clone(),
            model,
            "USDT",
        );

        let runner = FeedRunner::spawn(feed, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(120)).await;
        let polls = runner.shutdown().await;

        // Failures on odd polls never stop the loop
        assert!(polls >= 3, "only {} polls", polls);
        assert_eq!(polls as usize, calls.load(Ordering::SeqCst));
        assert_eq!(board.history(Asset::SYNTHETIC).len() as u64, polls.min(40));
        assert!(board.price(Asset::Btc) >= 50_000.0);

        // Nothing runs after shutdown
        let settled = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), settled);
    }
}
