//! Defines the command-line arguments of a desk session.
//!
//! This module uses `clap` to parse where configuration is read from and where
//! the portfolio snapshot is persisted. Everything that tunes the engine itself
//! lives in the layered configuration (see `crate::config`).

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Holds the session parameters parsed from the command line.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about = "Aura paper-trading desk", long_about = None)]
pub struct CommonArgs {
    /// Path to the configuration directory (reads `desk.toml` if present)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Path to the data directory (for the portfolio snapshot)
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Keep the portfolio in memory only; nothing is read from or written to disk
    #[arg(long)]
    ephemeral: bool,
}

impl CommonArgs {
    /// Parses command-line arguments into a `CommonArgs` struct.
    ///
    /// This function automatically handles `--help` and `--version` flags via `clap`.
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        CommonArgs::parse_from(args)
    }

    /// Returns the path to the configuration directory.
    pub fn get_config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Returns the path to the data directory.
    ///
    /// This directory holds one JSON file per persisted ledger key.
    pub fn get_data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }
}
