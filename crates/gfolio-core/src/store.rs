use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Portfolio, Position};

/// In-memory portfolios keyed by title. Writes are last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PortfolioStore {
    portfolios: BTreeMap<String, Portfolio>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a portfolio by title, returning the replaced entry.
    pub fn upsert(&mut self, portfolio: Portfolio) -> Option<Portfolio> {
        self.portfolios.insert(portfolio.title.clone(), portfolio)
    }

    pub fn remove(&mut self, title: &str) -> Option<Portfolio> {
        self.portfolios.remove(title)
    }

    pub fn get(&self, title: &str) -> Option<&Portfolio> {
        self.portfolios.get(title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Portfolio> {
        self.portfolios.get_mut(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.portfolios.contains_key(title)
    }

    /// Merge positions into the named portfolio. Returns `false` if the portfolio is unknown.
    pub fn merge_positions(
        &mut self,
        title: &str,
        positions: impl IntoIterator<Item = Position>,
    ) -> bool {
        let Some(portfolio) = self.portfolios.get_mut(title) else {
            return false;
        };
        for position in positions {
            portfolio.upsert_position(position);
        }
        true
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.portfolios.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portfolio> {
        self.portfolios.values()
    }

    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PortfolioData, PositionSymbol};

    fn portfolio(title: &str, id: &str) -> Portfolio {
        Portfolio {
            id: id.to_owned(),
            title: title.to_owned(),
            updated: String::new(),
            etag: String::new(),
            href: format!("https://example.test/portfolios/{id}"),
            feed_href: format!("https://example.test/portfolios/{id}/positions"),
            data: PortfolioData::default(),
            positions: BTreeMap::new(),
        }
    }

    fn position(title: &str, shares: f64) -> Position {
        Position {
            id: title.to_owned(),
            title: title.to_owned(),
            updated: String::new(),
            etag: String::new(),
            href: String::new(),
            feed_href: String::new(),
            symbol: PositionSymbol::default(),
            data: BTreeMap::from([(String::from("shares"), shares)]),
            transactions: BTreeMap::new(),
        }
    }

    #[test]
    fn same_title_overwrites_whole_entry() {
        let mut store = PortfolioStore::new();
        let mut first = portfolio("Retirement", "1");
        first.upsert_position(position("Google Inc.", 5.0));
        store.upsert(first);

        let replaced = store.upsert(portfolio("Retirement", "2"));

        assert_eq!(replaced.map(|p| p.id), Some(String::from("1")));
        let current = store.get("Retirement").expect("present");
        assert_eq!(current.id, "2");
        assert!(current.positions.is_empty(), "no sub-field merge");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn merge_positions_requires_known_portfolio() {
        let mut store = PortfolioStore::new();
        assert!(!store.merge_positions("Missing", vec![position("X", 1.0)]));

        store.upsert(portfolio("Trading", "7"));
        assert!(store.merge_positions(
            "Trading",
            vec![position("X", 1.0), position("X", 3.0)]
        ));

        let held = &store.get("Trading").expect("present").positions;
        assert_eq!(held.len(), 1);
        assert_eq!(held["X"].data["shares"], 3.0);
    }
}
