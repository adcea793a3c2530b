//! Public market data pages: historical quotes, intraday ticks, financial
//! statements and the quote summary table. None of these need a token.
//!
//! The provider answers an unknown symbol with HTTP 400, which is reported
//! as [`FinanceError::SymbolNotFound`].

use std::sync::Arc;

use time::Date;

use crate::config::GfolioConfig;
use crate::domain::{FinancialsResult, Quote, Snapshot, StatementPeriod, Symbol, Tick};
use crate::http_client::{HttpClient, HttpRequest};
use crate::normalize::{extract_financials, extract_snapshot, parse_quotes, parse_ticks};
use crate::FinanceError;

/// Intraday history is only served for this many trailing days.
pub const TICK_WINDOW_DAYS: u32 = 15;
/// Intraday sampling interval in seconds.
pub const TICK_INTERVAL_SECS: u32 = 61;

#[derive(Clone)]
pub struct MarketData {
    config: GfolioConfig,
    http_client: Arc<dyn HttpClient>,
}

impl MarketData {
    pub fn new(config: GfolioConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Daily prices between `start` and `end`, sorted ascending by date.
    pub async fn quotes(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<Vec<Quote>, FinanceError> {
        let url = format!(
            "{}/historical?q={}&startdate={}&enddate={}&output=csv",
            self.config.finance_url,
            urlencoding::encode(symbol.as_str()),
            compact_date(start),
            compact_date(end)
        );
        let body = self.fetch(symbol, url).await?;
        parse_quotes(&body)
    }

    /// Intraday prices in server order. The upstream only serves a fixed
    /// trailing window, so `start` and `end` do not narrow the result.
    pub async fn ticks(
        &self,
        symbol: &Symbol,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Vec<Tick>, FinanceError> {
        if start.is_some() || end.is_some() {
            tracing::debug!(
                ?start,
                ?end,
                window_days = TICK_WINDOW_DAYS,
                "tick range ignored; window is fixed"
            );
        }
        let url = format!(
            "{}/getprices?q={}&i={}&p={}d&f=d,o,h,l,c,v",
            self.config.finance_url,
            urlencoding::encode(symbol.as_str()),
            TICK_INTERVAL_SECS,
            TICK_WINDOW_DAYS
        );
        let body = self.fetch(symbol, url).await?;
        parse_ticks(&body)
    }

    /// Statement values for each requested label. Labels that cannot be
    /// located map to an empty list.
    pub async fn financials(
        &self,
        symbol: &Symbol,
        fields: &[String],
        period: StatementPeriod,
    ) -> Result<FinancialsResult, FinanceError> {
        let url = format!(
            "{}?q={}&fstype=ii",
            self.config.finance_url,
            urlencoding::encode(symbol.as_str())
        );
        let body = self.fetch(symbol, url).await?;
        Ok(extract_financials(&body, fields, period))
    }

    /// Summary table of the quote page.
    pub async fn snapshot(&self, symbol: &Symbol) -> Result<Snapshot, FinanceError> {
        let url = format!(
            "{}?q={}",
            self.config.finance_url,
            urlencoding::encode(symbol.as_str())
        );
        let body = self.fetch(symbol, url).await?;
        extract_snapshot(&body).ok_or_else(|| FinanceError::SymbolNotFound {
            symbol: symbol.to_string(),
        })
    }

    async fn fetch(&self, symbol: &Symbol, url: String) -> Result<String, FinanceError> {
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);
        tracing::debug!(
            ticker = symbol.ticker(),
            exchange = symbol.exchange(),
            url = %request.url,
            "fetching market data"
        );

        let response = self.http_client.execute(request).await?;
        match response.status {
            200..=299 => Ok(response.body),
            400 => Err(FinanceError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
            status => Err(FinanceError::Http { status }),
        }
    }
}

/// `YYYYMMDD`, the date form the history endpoint takes.
fn compact_date(date: Date) -> String {
    format!(
        "{:04}{:02}{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
