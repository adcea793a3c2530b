//! Historical quote and intraday tick CSV feeds.

use crate::domain::{parse_quote_date, Quote, Tick};
use crate::FinanceError;

/// Lines of metadata preceding the rows of an intraday feed.
pub const TICK_PREAMBLE_LINES: usize = 7;

const FIELD_COUNT: usize = 6;

fn split_row(line_no: usize, line: &str) -> Result<Vec<&str>, FinanceError> {
    let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
    if fields.len() < FIELD_COUNT {
        return Err(FinanceError::malformed_row(
            line_no,
            format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        ));
    }
    Ok(fields)
}

fn number(line_no: usize, name: &str, raw: &str) -> Result<f64, FinanceError> {
    raw.parse::<f64>()
        .map_err(|_| FinanceError::malformed_row(line_no, format!("{name} is not numeric: '{raw}'")))
}

/// Parse a historical price CSV. The header line is discarded and rows are
/// `date,open,high,low,close,volume`. Any bad row aborts the whole parse.
/// Output is sorted ascending by date.
pub fn parse_quotes(body: &str) -> Result<Vec<Quote>, FinanceError> {
    let mut quotes = Vec::new();

    for (index, line) in body.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let fields = split_row(line_no, line)?;
        let date = parse_quote_date(fields[0]).ok_or_else(|| {
            FinanceError::malformed_row(line_no, format!("invalid date '{}'", fields[0]))
        })?;

        quotes.push(Quote {
            date,
            open: number(line_no, "open", fields[1])?,
            high: number(line_no, "high", fields[2])?,
            low: number(line_no, "low", fields[3])?,
            close: number(line_no, "close", fields[4])?,
            volume: number(line_no, "volume", fields[5])?,
            adj_close: None,
        });
    }

    quotes.sort_by_key(|quote| quote.date);
    Ok(quotes)
}

/// Parse an intraday price feed. The first [`TICK_PREAMBLE_LINES`] lines are
/// dropped unconditionally and the leading marker character of each
/// timestamp is stripped. Rows keep server order.
///
/// Column mapping is `timestamp=0, close=1, high=2, low=3, open=4, volume=5`,
/// which differs from the historical quote feed.
pub fn parse_ticks(body: &str) -> Result<Vec<Tick>, FinanceError> {
    let mut ticks = Vec::new();

    for (index, line) in body.lines().enumerate().skip(TICK_PREAMBLE_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let fields = split_row(line_no, line)?;
        let mut stamp = fields[0].chars();
        stamp.next();

        ticks.push(Tick {
            timestamp: stamp.as_str().trim().to_owned(),
            close: number(line_no, "close", fields[1])?,
            high: number(line_no, "high", fields[2])?,
            low: number(line_no, "low", fields[3])?,
            open: number(line_no, "open", fields[4])?,
            volume: number(line_no, "volume", fields[5])?,
        });
    }

    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK_FEED: &str = "EXCHANGE%3DNASDAQ\n\
MARKET_OPEN_MINUTE=570\n\
MARKET_CLOSE_MINUTE=960\n\
INTERVAL=61\n\
COLUMNS=DATE,CLOSE,HIGH,LOW,OPEN,VOLUME\n\
DATA=\n\
TIMEZONE_OFFSET=-240\n\
a1316784600,31.41,31.5,31.4,31.43,150911\n\
1,31.44,31.46,31.39,31.42,81235\n";

    #[test]
    fn single_quote_row() {
        let quotes = parse_quotes(
            "Date,Open,High,Low,Close,Volume\n2009-12-31,112.77,112.80,111.39,111.44,90637900\n",
        )
        .expect("valid csv");

        assert_eq!(quotes.len(), 1);
        let quote = &quotes[0];
        assert_eq!(quote.date.to_string(), "2009-12-31");
        assert_eq!(quote.open, 112.77);
        assert_eq!(quote.high, 112.80);
        assert_eq!(quote.low, 111.39);
        assert_eq!(quote.close, 111.44);
        assert_eq!(quote.volume, 90_637_900.0);
        assert_eq!(quote.adj_close, None);
    }

    #[test]
    fn quotes_are_sorted_by_date() {
        let quotes = parse_quotes(
            "\u{feff}Date,Open,High,Low,Close,Volume\n\
5-Jan-10,2,2,2,2,2\n\
31-Dec-09,1,1,1,1,1\n\
4-Jan-10, 3 , 3 , 3 , 3 , 3 \n",
        )
        .expect("valid csv");

        let dates = quotes
            .iter()
            .map(|quote| quote.date.to_string())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2009-12-31", "2010-01-04", "2010-01-05"]);
        assert_eq!(quotes[1].open, 3.0);
    }

    #[test]
    fn short_quote_row_aborts_parse() {
        let error = parse_quotes(
            "Date,Open,High,Low,Close,Volume\n\
2009-12-31,1,1,1,1,1\n\
2009-12-30,1,1,1\n",
        )
        .expect_err("must fail");

        assert!(matches!(error, FinanceError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(parse_quotes("Date,Open,High,Low,Close,Volume\n")
            .expect("valid")
            .is_empty());
    }

    #[test]
    fn ticks_skip_preamble_and_strip_marker() {
        let ticks = parse_ticks(TICK_FEED).expect("valid feed");

        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].timestamp, "1316784600");
        assert_eq!(ticks[0].close, 31.41);
        assert_eq!(ticks[0].open, 31.43);
        assert_eq!(ticks[0].high, 31.5);
        assert_eq!(ticks[0].low, 31.4);
        assert_eq!(ticks[0].volume, 150_911.0);
        assert_eq!(ticks[1].timestamp, "");
    }

    #[test]
    fn tick_columns_follow_feed_header_order() {
        let feed = format!("{}a1000,1,2,3,4,5\n", "meta\n".repeat(7));
        let ticks = parse_ticks(&feed).expect("valid feed");

        let tick = &ticks[0];
        assert_eq!(tick.timestamp, "1000");
        assert_eq!(tick.close, 1.0);
        assert_eq!(tick.high, 2.0);
        assert_eq!(tick.low, 3.0);
        assert_eq!(tick.open, 4.0);
        assert_eq!(tick.volume, 5.0);
    }

    #[test]
    fn quote_and_tick_rows_map_columns_differently() {
        let quotes = parse_quotes("Date,Open,High,Low,Close,Volume\n2011-09-23,1,2,3,4,5\n")
            .expect("valid csv");
        let ticks = parse_ticks(&format!("{}a1000,1,2,3,4,5\n", "meta\n".repeat(7)))
            .expect("valid feed");

        assert_eq!(quotes[0].open, 1.0);
        assert_eq!(quotes[0].close, 4.0);
        assert_eq!(ticks[0].open, 4.0);
        assert_eq!(ticks[0].close, 1.0);
    }

    #[test]
    fn preamble_only_feed_is_empty() {
        let preamble = TICK_FEED.lines().take(7).collect::<Vec<_>>().join("\n");
        assert!(parse_ticks(&preamble).expect("valid").is_empty());
    }

    #[test]
    fn non_numeric_tick_is_malformed() {
        let feed = format!("{}x1316784600,abc,1,1,1,1\n", "meta\n".repeat(7));
        let error = parse_ticks(&feed).expect_err("must fail");
        assert!(matches!(error, FinanceError::MalformedRow { line: 8, .. }));
    }
}
