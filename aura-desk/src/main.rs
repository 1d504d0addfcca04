//! Interactive paper-trading desk.
//!
//! Polls live prices in the background and reads commands from stdin until
//! `quit`, end of input or Ctrl-C.

mod command;
mod desk;
mod render;

use anyhow::Context;
use aura::KeyValueStore;
use aura_core::args::CommonArgs;
use aura_core::feed::BinanceQuoteSource;
use aura_core::fs::{JsonFileStore, MemoryStore, PathManager};
use aura_core::{
    DeskConfig, FeedRunner, PortfolioLedger, PriceBoard, PriceFeed, SyntheticPriceModel,
};
use desk::{Desk, Outcome};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("=== Aura Desk Starting ===");

    // 1. Arguments and configuration
    let args = CommonArgs::parse_args(std::env::args_os());
    let paths = PathManager::from_args(&args);
    let config = DeskConfig::load(&paths.config_file())
        .with_context(|| format!("loading {}", paths.config_file().display()))?;

    // 2. Ledger
    let store: Box<dyn KeyValueStore> = if args.is_ephemeral() {
        info!("Ephemeral session, nothing will be persisted");
        Box::new(MemoryStore::new())
    } else {
        if let Err(e) = paths.ensure_dirs() {
            warn!("Could not create data directory: {}", e);
        }
        Box::new(JsonFileStore::new(paths.data_dir()))
    };
    let ledger = PortfolioLedger::open(store, config.ledger());

    // 3. Price feed
    let board = PriceBoard::new(config.feed().history_capacity());
    let source = BinanceQuoteSource::new(config.feed()).context("building quote client")?;
    let feed = PriceFeed::new(
        source,
        board.clone(),
        SyntheticPriceModel::from_config(config.synthetic()),
        config.feed().quote_currency(),
    );
    let runner = FeedRunner::spawn(feed, config.feed().poll_interval());

    // 4. Command loop
    let mut desk = Desk::new(ledger, board, config.ledger().clone());
    println!("{}", command::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                };
                match desk.handle_line(&line) {
                    Outcome::Print(text) => println!("{}\n", text),
                    Outcome::Quit => break,
                }
            }
        }
    }

    let polls = runner.shutdown().await;
    info!(
        "Session closed after {} polls. Cash {:.2}",
        polls,
        desk.ledger().cash()
    );
    Ok(())
}
