//! Portfolio and position entries from the JSON (`alt=json`) feeds.
//!
//! Entries follow the GData JSON layout: text nodes as `{"$t": ...}`,
//! namespaced elements as `prefix$name`. The link collection is positional:
//! portfolios use index 1 as their self/edit link, positions use index 0.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Portfolio, PortfolioData, Position, PositionSymbol};
use crate::FinanceError;

const PORTFOLIO_LINK_INDEX: usize = 1;
const POSITION_LINK_INDEX: usize = 0;
const CURRENCY_CODE_KEY: &str = "currencyCode";

#[derive(Debug, Deserialize)]
struct RawFeedDocument {
    feed: Option<RawFeed>,
}

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    entry: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawEntryDocument {
    entry: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$t")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSymbol {
    symbol: Option<String>,
    exchange: Option<String>,
    #[serde(rename = "fullName")]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: Option<TextNode>,
    title: Option<TextNode>,
    updated: Option<TextNode>,
    #[serde(rename = "gd$etag", alias = "etag")]
    etag: Option<String>,
    link: Option<Vec<RawLink>>,
    #[serde(rename = "gd$feedLink", alias = "feedLink")]
    feed_link: Option<RawLink>,
    #[serde(rename = "gf$portfolioData", alias = "portfolioData")]
    portfolio_data: Option<Map<String, Value>>,
    #[serde(rename = "gf$positionData", alias = "positionData")]
    position_data: Option<Map<String, Value>>,
    #[serde(rename = "gf$symbol", alias = "symbol")]
    symbol: Option<RawSymbol>,
}

/// Fields every entry kind carries.
struct EntryHeader {
    id: String,
    title: String,
    updated: String,
    etag: String,
    href: String,
    feed_href: String,
}

impl RawEntry {
    fn header(&mut self, link_index: usize) -> Result<EntryHeader, FinanceError> {
        Ok(EntryHeader {
            title: text(self.title.take(), "title.$t")?,
            updated: text(self.updated.take(), "updated.$t")?,
            id: text(self.id.take(), "id.$t")?,
            etag: self
                .etag
                .take()
                .ok_or_else(|| FinanceError::malformed_entry("gd$etag"))?,
            href: self
                .link
                .as_mut()
                .and_then(|links| links.get_mut(link_index))
                .and_then(|link| link.href.take())
                .ok_or_else(|| FinanceError::malformed_entry(format!("link[{link_index}].href")))?,
            feed_href: self
                .feed_link
                .take()
                .and_then(|link| link.href)
                .ok_or_else(|| FinanceError::malformed_entry("gd$feedLink.href"))?,
        })
    }
}

fn text(node: Option<TextNode>, field: &str) -> Result<String, FinanceError> {
    node.and_then(|node| node.text)
        .ok_or_else(|| FinanceError::malformed_entry(field))
}

fn decode_entry(entry: Value) -> Result<RawEntry, FinanceError> {
    if !entry.is_object() {
        return Err(FinanceError::malformed_entry("entry"));
    }
    Ok(serde_json::from_value(entry)?)
}

/// Coerce one data-bag value to `f64`. JSON numbers pass through, strings are trimmed and parsed.
fn metric_value(key: &str, value: &Value) -> Result<f64, FinanceError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FinanceError::InvalidMetricValue {
        key: key.to_owned(),
        value: match value {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        },
    })
}

fn metrics(bag: &Map<String, Value>) -> Result<BTreeMap<String, f64>, FinanceError> {
    bag.iter()
        .map(|(key, value)| Ok((key.clone(), metric_value(key, value)?)))
        .collect()
}

fn portfolio_data(bag: Map<String, Value>) -> Result<PortfolioData, FinanceError> {
    let mut data = PortfolioData::default();
    for (key, value) in bag {
        if key == CURRENCY_CODE_KEY {
            data.currency_code = Some(match value {
                Value::String(code) => code,
                other => other.to_string(),
            });
            continue;
        }
        let metric = metric_value(&key, &value)?;
        data.metrics.insert(key, metric);
    }
    Ok(data)
}

/// Normalize one portfolio entry.
pub fn portfolio_from_entry(entry: Value) -> Result<Portfolio, FinanceError> {
    let mut raw = decode_entry(entry)?;
    let header = raw.header(PORTFOLIO_LINK_INDEX)?;
    let bag = raw
        .portfolio_data
        .take()
        .ok_or_else(|| FinanceError::malformed_entry("gf$portfolioData"))?;

    Ok(Portfolio {
        id: header.id,
        title: header.title,
        updated: header.updated,
        etag: header.etag,
        href: header.href,
        feed_href: header.feed_href,
        data: portfolio_data(bag)?,
        positions: BTreeMap::new(),
    })
}

/// Normalize one position entry.
pub fn position_from_entry(entry: Value) -> Result<Position, FinanceError> {
    let mut raw = decode_entry(entry)?;
    let header = raw.header(POSITION_LINK_INDEX)?;
    let bag = raw
        .position_data
        .take()
        .ok_or_else(|| FinanceError::malformed_entry("gf$positionData"))?;
    let symbol = raw
        .symbol
        .take()
        .ok_or_else(|| FinanceError::malformed_entry("gf$symbol"))?;

    Ok(Position {
        id: header.id,
        title: header.title,
        updated: header.updated,
        etag: header.etag,
        href: header.href,
        feed_href: header.feed_href,
        symbol: PositionSymbol {
            symbol: symbol
                .symbol
                .ok_or_else(|| FinanceError::malformed_entry("gf$symbol.symbol"))?,
            exchange: symbol
                .exchange
                .ok_or_else(|| FinanceError::malformed_entry("gf$symbol.exchange"))?,
            full_name: symbol
                .full_name
                .ok_or_else(|| FinanceError::malformed_entry("gf$symbol.fullName"))?,
        },
        data: metrics(&bag)?,
        transactions: BTreeMap::new(),
    })
}

fn feed_entries(body: &str) -> Result<Vec<Value>, FinanceError> {
    let document: RawFeedDocument = serde_json::from_str(body)?;
    let feed = document
        .feed
        .ok_or_else(|| FinanceError::malformed_entry("feed"))?;
    Ok(feed.entry)
}

/// Normalize every entry of a portfolios feed, in feed order.
pub fn portfolios_from_feed(body: &str) -> Result<Vec<Portfolio>, FinanceError> {
    feed_entries(body)?
        .into_iter()
        .map(portfolio_from_entry)
        .collect()
}

/// Normalize every entry of a positions feed, in feed order.
pub fn positions_from_feed(body: &str) -> Result<Vec<Position>, FinanceError> {
    feed_entries(body)?
        .into_iter()
        .map(position_from_entry)
        .collect()
}

/// Normalize the single entry echoed back by a create request.
pub fn portfolio_from_document(body: &str) -> Result<Portfolio, FinanceError> {
    let document: RawEntryDocument = serde_json::from_str(body)?;
    let entry = document
        .entry
        .ok_or_else(|| FinanceError::malformed_entry("entry"))?;
    portfolio_from_entry(entry)
}
