use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 24;
const EXCHANGE_SEPARATOR: char = ':';

/// Ticker symbol, optionally exchange-qualified (`NASDAQ:GOOG`, `TSE:CVG`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase. At most one `:` may appear,
    /// separating a non-empty exchange from a non-empty ticker.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        let mut separator = None;
        for (index, ch) in normalized.chars().enumerate() {
            if ch == EXCHANGE_SEPARATOR {
                let misplaced = separator.is_some() || index == 0 || index + 1 == len;
                if misplaced {
                    return Err(ValidationError::SymbolInvalidChar { ch, index });
                }
                separator = Some(index);
                continue;
            }
            if !(ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-')) {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Exchange qualifier, when the symbol was given as `EXCHANGE:TICKER`.
    pub fn exchange(&self) -> Option<&str> {
        self.0
            .split_once(EXCHANGE_SEPARATOR)
            .map(|(exchange, _)| exchange)
    }

    /// The ticker without any exchange qualifier.
    pub fn ticker(&self) -> &str {
        self.0
            .split_once(EXCHANGE_SEPARATOR)
            .map_or(self.0.as_str(), |(_, ticker)| ticker)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" goog ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "GOOG");
    }

    #[test]
    fn accepts_exchange_prefix() {
        let parsed = Symbol::parse("tse:cvg").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "TSE:CVG");
        assert_eq!(parsed.exchange(), Some("TSE"));
        assert_eq!(parsed.ticker(), "CVG");
    }

    #[test]
    fn bare_ticker_has_no_exchange() {
        let parsed = Symbol::parse("brk.b").expect("symbol should parse");
        assert_eq!(parsed.exchange(), None);
        assert_eq!(parsed.ticker(), "BRK.B");
    }

    #[test]
    fn rejects_dangling_or_repeated_separator() {
        for (input, index) in [(":GOOG", 0), ("NASDAQ:", 6), ("A:B:C", 3)] {
            let err = Symbol::parse(input).expect_err("must fail");
            assert_eq!(err, ValidationError::SymbolInvalidChar { ch: ':', index });
        }
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("GOOG&output=csv").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { ch: '&', .. }));
    }
}
