use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// Portfolio-level data bag. `currencyCode` is the only non-numeric key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub currency_code: Option<String>,
    pub metrics: BTreeMap<String, f64>,
}

impl PortfolioData {
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }
}

/// A portfolio as held in the session store, keyed by `title`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    pub title: String,
    pub updated: String,
    pub etag: String,
    /// Self/edit link; target of delete requests.
    pub href: String,
    /// Positions feed for this portfolio.
    pub feed_href: String,
    pub data: PortfolioData,
    pub positions: BTreeMap<String, Position>,
}

impl Portfolio {
    /// Insert or replace a position by title.
    pub fn upsert_position(&mut self, position: Position) -> Option<Position> {
        self.positions.insert(position.title.clone(), position)
    }
}

/// Ticker identity attached to a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSymbol {
    pub symbol: String,
    pub exchange: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub title: String,
    pub updated: String,
    pub etag: String,
    pub href: String,
    pub feed_href: String,
    pub symbol: PositionSymbol,
    pub data: BTreeMap<String, f64>,
    /// Never populated; no transaction feed is fetched.
    pub transactions: BTreeMap<String, Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub updated: String,
    pub data: BTreeMap<String, f64>,
}

/// Daily historical price row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(with = "crate::domain::date::iso")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Not published by this feed.
    pub adj_close: Option<f64>,
}

/// Intraday price row, kept in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub timestamp: String,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub volume: f64,
}

/// Reporting period of the financial statements page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementPeriod {
    Annual,
    Quarterly,
}

impl StatementPeriod {
    /// Token embedded in the statement container ids.
    pub const fn id_token(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "interim",
        }
    }

    /// Number of period columns following the label cell.
    pub const fn column_count(self) -> usize {
        match self {
            Self::Annual => 4,
            Self::Quarterly => 5,
        }
    }
}

/// Requested field name to its period values; unmatched fields map to an empty list.
pub type FinancialsResult = BTreeMap<String, Vec<String>>;

/// Label/value pairs from the quote page summary table.
pub type Snapshot = BTreeMap<String, String>;

/// Validate a currency code for portfolio creation: exactly 3 ASCII letters, uppercased.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid =
        normalized.chars().count() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}
