//! CLI argument definitions for tickboard.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quotes` | Fetch the quote table |
//! | `history` | Fetch recent daily closes for one symbol |
//! | `dashboard` | Quote table plus the history chart of a selected symbol |
//!
//! # Examples
//!
//! ```bash
//! tickboard quotes
//! tickboard quotes AAPL NVDA --sort change-percent --descending
//! tickboard history MSFT --window 10
//! tickboard dashboard --select GOOGL --search o
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tickboard_core::{SortConfig, SortDirection, SortKey};

/// Terminal stock dashboard backed by Alpha Vantage.
///
/// The API key is read from TICKBOARD_ALPHAVANTAGE_API_KEY unless --api-key
/// is given. The free "demo" key only answers for a handful of symbols.
#[derive(Debug, Parser)]
#[command(name = "tickboard", author, version, about = "Terminal stock dashboard")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Alpha Vantage API key.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the provider query URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Cap on concurrent quote requests (default: all at once).
    #[arg(long, global = true)]
    pub max_in_flight: Option<usize>,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG still wins.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text table and chart.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Symbol,
    Price,
    ChangePercent,
}

impl From<SortColumn> for SortKey {
    fn from(value: SortColumn) -> Self {
        match value {
            SortColumn::Symbol => Self::Symbol,
            SortColumn::Price => Self::Price,
            SortColumn::ChangePercent => Self::ChangePercent,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest quote for each symbol.
    ///
    /// Without symbols, the configured list is used
    /// (TICKBOARD_SYMBOLS, default AAPL MSFT GOOGL AMZN META).
    Quotes(QuotesArgs),

    /// Show the most recent daily closes for one symbol.
    History(HistoryArgs),

    /// Quote table plus the price history of a selected symbol.
    Dashboard(DashboardArgs),
}

/// Search and sort options shared by table-producing commands.
#[derive(Debug, Args)]
pub struct TableArgs {
    /// Keep only symbols containing this text (case-insensitive).
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort the table by a column.
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort", default_value_t = false)]
    pub descending: bool,
}

impl TableArgs {
    pub fn sort_config(&self) -> SortConfig {
        match self.sort {
            Some(column) => {
                let direction = if self.descending {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                SortConfig::by(column.into(), direction)
            }
            None => SortConfig::default(),
        }
    }
}

#[derive(Debug, Args)]
pub struct QuotesArgs {
    /// Symbols to quote (e.g., AAPL MSFT).
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Symbol to chart.
    pub symbol: String,

    /// Number of trading days to keep.
    #[arg(long)]
    pub window: Option<usize>,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Symbol whose history is charted under the table.
    #[arg(long)]
    pub select: Option<String>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sort_flags_map_to_sort_config() {
        let cli = Cli::try_parse_from([
            "tickboard",
            "quotes",
            "aapl",
            "--sort",
            "change-percent",
            "--descending",
        ])
        .expect("valid arguments");

        let Command::Quotes(args) = cli.command else {
            panic!("expected quotes command");
        };
        assert_eq!(args.symbols, vec!["aapl"]);
        assert_eq!(
            args.table.sort_config(),
            SortConfig::by(SortKey::ChangePercent, SortDirection::Descending)
        );
    }

    #[test]
    fn descending_requires_a_sort_column() {
        assert!(Cli::try_parse_from(["tickboard", "quotes", "--descending"]).is_err());
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tickboard",
            "history",
            "MSFT",
            "--format",
            "json",
            "-vv",
            "--timeout-ms",
            "500",
        ])
        .expect("valid arguments");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout_ms, Some(500));
    }
}
