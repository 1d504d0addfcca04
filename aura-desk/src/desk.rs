use crate::command::{Command, HELP};
use crate::render;
use aura_core::{LedgerConfig, PortfolioLedger, PriceBoard};
use chrono::Utc;
use log::debug;

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Binds user commands to the ledger and the live board.
///
/// Every trade reads the board's snapshot at the moment the command runs.
pub struct Desk {
    ledger: PortfolioLedger,
    board: PriceBoard,
    settings: LedgerConfig,
}

impl Desk {
    pub fn new(ledger: PortfolioLedger, board: PriceBoard, settings: LedgerConfig) -> Self {
        Self {
            ledger,
            board,
            settings,
        }
    }

    pub fn ledger(&self) -> &PortfolioLedger {
        &self.ledger
    }

    /// Parses and runs one input line.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(e) => Outcome::Print(e.to_string()),
        }
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        debug!("Executing {:?}", command);

        let text = match command {
            Command::Buy { asset, amount } => {
                let spend = amount.unwrap_or_else(|| self.settings.default_spend());
                match self.ledger.buy(asset, spend, &self.board.snapshot()) {
                    Ok(fill) => render::fill(&fill),
                    Err(e) => e.to_string(),
                }
            }
            Command::Sell { asset } => match self.ledger.sell(asset, &self.board.snapshot()) {
                Ok(fill) => render::fill(&fill),
                Err(e) => e.to_string(),
            },
            Command::Refill => {
                let balance = self.ledger.refill(self.settings.refill_amount());
                format!(
                    "Added ${} to wallet, cash is now ${}",
                    render::format_money(self.settings.refill_amount()),
                    render::format_money(balance)
                )
            }
            Command::Status => self.status(),
            Command::Chart { asset } => render::chart(asset, &self.board.history(asset)),
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };

        Outcome::Print(text)
    }

    pub fn status(&self) -> String {
        render::board(self.ledger.state(), &self.board.state(), Utc::now())
    }
}
