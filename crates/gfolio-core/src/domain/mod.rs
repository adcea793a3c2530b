//! # Domain Models
//!
//! Plain records produced by the normalizers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Portfolio`] | Portfolio entry with its data bag and positions |
//! | [`Position`] | Holding inside a portfolio |
//! | [`Quote`] | Daily historical price row |
//! | [`Tick`] | Intraday price row |
//! | [`FinancialsResult`] | Statement field values per requested label |
//! | [`Symbol`] | Validated ticker symbol |
//!
//! Every amount is an `f64`. Money is carried in binary floating point as
//! the upstream feeds publish it; no decimal accounting is attempted.

mod date;
mod models;
mod symbol;

pub use date::{iso, parse_quote_date};
pub use models::{
    validate_currency_code, FinancialsResult, Portfolio, PortfolioData, Position, PositionSymbol,
    Quote, Snapshot, StatementPeriod, Tick, Transaction,
};
pub use symbol::Symbol;
