//! CLI argument definitions for Fundscope.
//!
//! A single lookup per invocation: the positional identifier is the
//! registrant's CIK (the `CIK` prefix and surrounding whitespace are
//! tolerated), and `--sort` picks the holdings ordering.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--sort` | `value` | Holdings ordering (value, balance, title) |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--limit` | `25` | Max table rows (0 = all) |
//! | `--timeout-ms` | `10000` | Per-request timeout |
//! | `--delay-ms` | `1000` | Courtesy pause before each EDGAR call |
//! | `--user-agent` | built-in | Identifying User-Agent sent to EDGAR |
//!
//! # Examples
//!
//! ```bash
//! # Largest positions of the latest NPORT-P filing
//! fundscope 0000036405
//!
//! # Alphabetical, as JSON
//! fundscope CIK0000036405 --sort title --format json --pretty
//! ```

use clap::{Parser, ValueEnum};

/// Look up a fund's latest NPORT-P holdings on SEC EDGAR.
#[derive(Debug, Parser)]
#[command(
    name = "fundscope",
    author,
    version,
    about = "Latest NPORT-P portfolio holdings for an SEC registrant"
)]
pub struct Cli {
    /// Registrant identifier (CIK), with or without the CIK prefix.
    pub identifier: String,

    /// Holdings ordering.
    #[arg(long, value_enum, default_value_t = SortOrder::Value)]
    pub sort: SortOrder,

    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Maximum holdings rows in table output; 0 prints all.
    #[arg(long, default_value_t = 25)]
    pub limit: usize,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Courtesy pause before each EDGAR call, in milliseconds.
    #[arg(long, default_value_t = 1_000)]
    pub delay_ms: u64,

    /// Identifying User-Agent sent to EDGAR (fair-access policy).
    #[arg(long)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Descending market value in USD.
    Value,
    /// Descending share/par balance.
    Balance,
    /// Ascending security title.
    Title,
}

impl SortOrder {
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Balance => "balance",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned ASCII table.
    Table,
    /// Single JSON object.
    Json,
}
