use gfolio_core::domain::parse_quote_date;
use gfolio_core::{MarketData, Quote, StatementPeriod, Symbol, Tick};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{FinancialsArgs, QuotesArgs, SymbolArgs};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct QuotesResponseData {
    symbol: Symbol,
    quotes: Vec<Quote>,
}

#[derive(Debug, Serialize)]
struct TicksResponseData {
    symbol: Symbol,
    ticks: Vec<Tick>,
}

fn parse_date(raw: &str) -> Result<time::Date, CliError> {
    parse_quote_date(raw).ok_or_else(|| CliError::Command(format!("invalid date '{raw}'")))
}

pub async fn quotes(market: &MarketData, args: &QuotesArgs) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    if start > end {
        return Err(CliError::Command(format!(
            "start {start} is after end {end}"
        )));
    }

    let quotes = market.quotes(&symbol, start, end).await?;
    Ok(serde_json::to_value(QuotesResponseData { symbol, quotes })?)
}

pub async fn ticks(market: &MarketData, args: &SymbolArgs) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let ticks = market.ticks(&symbol, None, None).await?;
    Ok(serde_json::to_value(TicksResponseData { symbol, ticks })?)
}

pub async fn financials(market: &MarketData, args: &FinancialsArgs) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let period = if args.quarterly {
        StatementPeriod::Quarterly
    } else {
        StatementPeriod::Annual
    };

    let result = market.financials(&symbol, &args.fields, period).await?;
    Ok(serde_json::to_value(result)?)
}

pub async fn snapshot(market: &MarketData, args: &SymbolArgs) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let snapshot = market.snapshot(&symbol).await?;
    Ok(serde_json::to_value(snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::parse_date;

    #[test]
    fn dates_accept_iso_and_provider_forms() {
        assert_eq!(
            parse_date("2010-01-04").expect("iso").to_string(),
            "2010-01-04"
        );
        assert_eq!(
            parse_date("4-Jan-10").expect("compact").to_string(),
            "2010-01-04"
        );
        assert!(parse_date("yesterday").is_err());
    }
}
