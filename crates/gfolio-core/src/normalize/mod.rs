//! Response normalizers: raw feed bodies in, domain records out.
//!
//! | Module | Input | Output |
//! |--------|-------|--------|
//! | [`feed`] | JSON portfolio/position feeds | [`Portfolio`](crate::Portfolio), [`Position`](crate::Position) |
//! | [`prices`] | CSV history and intraday feeds | [`Quote`](crate::Quote), [`Tick`](crate::Tick) |
//! | [`financials`] | HTML quote pages | [`FinancialsResult`](crate::FinancialsResult), [`Snapshot`](crate::Snapshot) |

pub mod feed;
pub mod financials;
pub mod prices;

pub use feed::{
    portfolio_from_document, portfolio_from_entry, portfolios_from_feed, position_from_entry,
    positions_from_feed,
};
pub use financials::{
    extract_financials, extract_financials_with, extract_snapshot, FieldExtractor,
    StatementTableExtractor,
};
pub use prices::{parse_quotes, parse_ticks, TICK_PREAMBLE_LINES};
