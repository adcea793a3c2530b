use thiserror::Error;

use crate::http_client::HttpError;

/// Input validation errors raised before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("currency must be exactly 3 characters: '{value}'")]
    InvalidCurrency { value: String },

    #[error("portfolio title cannot be empty")]
    EmptyTitle,
}

/// Failure kinds surfaced by session, feed and market data operations.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("network error: {0}")]
    Network(#[from] HttpError),

    #[error("upstream returned status {status}")]
    Http { status: u16 },

    #[error("malformed entry: missing '{field}'")]
    MalformedEntry { field: String },

    #[error("metric '{key}' is not numeric: '{value}'")]
    InvalidMetricValue { key: String, value: String },

    #[error("malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("no portfolio titled '{title}' in the store")]
    UnknownPortfolio { title: String },

    #[error("no data for symbol '{symbol}', symbol error?")]
    SymbolNotFound { symbol: String },

    #[error("json decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl FinanceError {
    pub(crate) fn malformed_entry(field: impl Into<String>) -> Self {
        Self::MalformedEntry {
            field: field.into(),
        }
    }

    pub(crate) fn malformed_row(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, used by the CLI for error output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "auth.failed",
            Self::NotAuthenticated => "auth.missing",
            Self::Network(_) => "transport.network",
            Self::Http { .. } => "transport.status",
            Self::MalformedEntry { .. } => "parse.malformed_entry",
            Self::InvalidMetricValue { .. } => "parse.invalid_metric",
            Self::MalformedRow { .. } => "parse.malformed_row",
            Self::UnknownPortfolio { .. } => "store.unknown_portfolio",
            Self::SymbolNotFound { .. } => "market.symbol_not_found",
            Self::Json(_) => "parse.json",
            Self::Validation(_) => "input.invalid",
        }
    }
}
