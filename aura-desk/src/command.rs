//! Parsing of the desk's line commands.

use aura::{Asset, UnknownAsset};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Spend `amount` (or the configured default) on `asset`.
    Buy { asset: Asset, amount: Option<f64> },
    /// Close the whole position in `asset`.
    Sell { asset: Asset },
    Refill,
    Status,
    Chart { asset: Asset },
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an asset, e.g. '{0} BTC'")]
    MissingAsset(&'static str),

    #[error(transparent)]
    Asset(#[from] UnknownAsset),

    #[error("'{0}' is not a valid amount")]
    BadAmount(String),

    #[error("Too many arguments for '{0}'")]
    TooManyArguments(&'static str),
}

pub const HELP: &str = "\
Commands:
  buy <ASSET> [AMOUNT]   spend AMOUNT cash on ASSET (default spend if omitted)
  sell <ASSET>           sell the whole position in ASSET
  refill                 add the refill amount to wallet cash
  status                 show prices, positions and totals (also: empty line)
  chart <ASSET>          show the recent price trend of ASSET
  help                   show this help
  quit                   end the session";

impl Command {
    /// Parses one input line. Keywords and symbols are case-insensitive.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(Command::Status);
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "buy" | "b" => {
                let asset = asset_arg(words.next(), "buy")?;
                let amount = words.next().map(parse_amount).transpose()?;
                ensure_done(words.next(), "buy")?;
                Command::Buy { asset, amount }
            }
            "sell" | "s" => {
                let asset = asset_arg(words.next(), "sell")?;
                ensure_done(words.next(), "sell")?;
                Command::Sell { asset }
            }
            "chart" | "c" => {
                let asset = asset_arg(words.next(), "chart")?;
                ensure_done(words.next(), "chart")?;
                Command::Chart { asset }
            }
            "refill" => {
                ensure_done(words.next(), "refill")?;
                Command::Refill
            }
            "status" | "ls" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn asset_arg(word: Option<&str>, command: &'static str) -> Result<Asset, CommandError> {
    let word = word.ok_or(CommandError::MissingAsset(command))?;
    Ok(word.parse::<Asset>()?)
}

fn parse_amount(word: &str) -> Result<f64, CommandError> {
    let cleaned: String = word
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CommandError::BadAmount(word.to_string()))
}

fn ensure_done(extra: Option<&str>, command: &'static str) -> Result<(), CommandError> {
    match extra {
        Some(_) => Err(CommandError::TooManyArguments(command)),
        None => Ok(()),
    }
}
