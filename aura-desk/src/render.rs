//! Text rendering of prices, positions and trends.

use aura::{Asset, Fill, Side};
use aura_core::{MarketState, PortfolioState};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Prices below one show eight decimals, everything else two with
/// thousands separators.
pub fn format_price(price: f64) -> String {
    if price.abs() < 1.0 {
        format!("{:.8}", price)
    } else {
        format_money(price)
    }
}

/// Two decimals with thousands separators, e.g. `12,345.60`.
pub fn format_money(value: f64) -> String {
    let digits = format!("{:.2}", value.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && digits != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Profit or loss with an explicit sign.
pub fn format_pnl(pnl: f64) -> String {
    if pnl >= 0.0 {
        format!("+{:.2}", pnl)
    } else {
        format!("{:.2}", pnl)
    }
}

pub fn format_quantity(quantity: f64) -> String {
    if quantity < 1.0 {
        format!("{:.8}", quantity)
    } else {
        format!("{:.2}", quantity)
    }
}

/// One bar per sample, scaled between the window's min and max.
///
/// Fewer than two samples draw nothing. A flat window draws its lowest bar.
pub fn sparkline(samples: &[f64]) -> String {
    if samples.len() < 2 {
        return String::new();
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min > 0.0 { max - min } else { 1.0 };
    let top = (BARS.len() - 1) as f64;

    samples
        .iter()
        .map(|sample| {
            let level = ((sample - min) / range).clamp(0.0, 1.0);
            BARS[(level * top).round() as usize]
        })
        .collect()
}

/// Totals line shown above the board.
pub fn header(portfolio: &PortfolioState, market: &MarketState) -> String {
    format!(
        "TOTAL COST ${}  |  LIVE EQUITY ${}  |  WALLET CASH ${}",
        format_money(portfolio.total_cost()),
        format_money(portfolio.equity(&market.snapshot)),
        format_money(portfolio.cash()),
    )
}

/// How fresh the market prices are.
pub fn freshness(market: &MarketState, now: DateTime<Utc>) -> String {
    match market.quoted_at {
        None => "awaiting first quote".to_string(),
        Some(at) => {
            let age = (now - at).num_seconds().max(0);
            format!("quoted {}s ago", age)
        }
    }
}

/// The full board: header, then one row per asset in display order.
pub fn board(portfolio: &PortfolioState, market: &MarketState, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header(portfolio, market));
    let _ = writeln!(out, "({})", freshness(market, now));

    for asset in Asset::ALL {
        let price = market.snapshot.price(asset);
        let pnl = portfolio.unrealized_pnl(asset, &market.snapshot);
        let _ = writeln!(
            out,
            "{:<13} {:>17}  {:>10}  {}",
            format!("{} / USDT", asset),
            format!("${}", format_price(price)),
            format_pnl(pnl),
            sparkline(&market.history.to_vec(asset)),
        );

        let held = portfolio.holdings(asset);
        if held > 0.0 {
            let _ = writeln!(out, "    Balance: {} {}", format_quantity(held), asset);
        }
    }

    out.truncate(out.trim_end().len());
    out
}

/// A single asset's recent trend with its range.
pub fn chart(asset: Asset, samples: &[f64]) -> String {
    if samples.len() < 2 {
        return format!("{}: not enough samples yet ({})", asset, samples.len());
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let last = samples[samples.len() - 1];

    format!(
        "{} {}\n  low ${}  high ${}  last ${}  ({} samples)",
        asset,
        sparkline(samples),
        format_price(min),
        format_price(max),
        format_price(last),
        samples.len(),
    )
}

pub fn fill(fill: &Fill) -> String {
    let verb = match fill.side {
        Side::Buy => "Bought",
        Side::Sell => "Sold",
    };
    format!(
        "{} {} {} @ ${} for ${}",
        verb,
        format_quantity(fill.quantity),
        fill.asset,
        format_price(fill.price),
        format_money(fill.notional),
    )
}
