//! CLI argument definitions for gfolio.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `portfolios` | List portfolios of the logged-in account |
//! | `positions` | List positions held in one portfolio |
//! | `create` | Create a portfolio |
//! | `delete` | Delete a portfolio by title |
//! | `quotes` | Fetch daily historical prices |
//! | `ticks` | Fetch intraday prices for the trailing window |
//! | `financials` | Extract statement rows by label |
//! | `snapshot` | Fetch the quote page summary table |
//!
//! Portfolio commands log in with `GFOLIO_EMAIL` and `GFOLIO_PASSWORD`.
//! Market data commands need no credentials.
//!
//! # Examples
//!
//! ```bash
//! gfolio portfolios --pretty
//! gfolio quotes GOOG 2010-01-04 2010-01-29
//! gfolio financials GOOG --field "Total Revenue" --field "Net Income" --quarterly
//! ```

use clap::{Args, Parser, Subcommand};

/// Portfolio feeds and market data pages from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "gfolio",
    author,
    version,
    about = "Portfolio feeds and market data client"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log requests and responses to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Request timeout in milliseconds. Overrides `GFOLIO_TIMEOUT_MS`.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List portfolios with their performance data.
    ///
    ///   gfolio portfolios
    Portfolios,

    /// List positions of a portfolio.
    ///
    ///   gfolio positions Retirement
    Positions(TitleArgs),

    /// Create a portfolio.
    ///
    ///   gfolio create Trading USD
    Create(CreateArgs),

    /// Delete a portfolio.
    ///
    ///   gfolio delete Trading
    Delete(TitleArgs),

    /// Daily historical prices between two dates.
    ///
    ///   gfolio quotes GOOG 2010-01-04 2010-01-29
    Quotes(QuotesArgs),

    /// Intraday prices for the fixed trailing window.
    ///
    ///   gfolio ticks MSFT
    Ticks(SymbolArgs),

    /// Financial statement rows by label.
    ///
    ///   gfolio financials GOOG --field "Total Revenue"
    Financials(FinancialsArgs),

    /// Summary table of the quote page.
    ///
    ///   gfolio snapshot GOOG
    Snapshot(SymbolArgs),
}

#[derive(Debug, Clone, Args)]
pub struct TitleArgs {
    /// Portfolio title.
    pub title: String,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Portfolio title.
    pub title: String,

    /// Three-letter currency code.
    pub currency: String,
}

#[derive(Debug, Clone, Args)]
pub struct SymbolArgs {
    /// Ticker symbol, optionally prefixed with an exchange (NASDAQ:GOOG).
    pub symbol: String,
}

#[derive(Debug, Clone, Args)]
pub struct QuotesArgs {
    /// Ticker symbol.
    pub symbol: String,

    /// First day, `YYYY-MM-DD`.
    pub start: String,

    /// Last day, `YYYY-MM-DD`.
    pub end: String,
}

#[derive(Debug, Clone, Args)]
pub struct FinancialsArgs {
    /// Ticker symbol.
    pub symbol: String,

    /// Row label to extract. Repeat for several rows.
    #[arg(long = "field", required = true)]
    pub fields: Vec<String>,

    /// Read the quarterly statements instead of the annual ones.
    #[arg(long, default_value_t = false)]
    pub quarterly: bool,
}
