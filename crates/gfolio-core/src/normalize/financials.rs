//! Financial statement and snapshot extraction from the HTML quote pages.
//!
//! This is coupled to undocumented page structure and will break whenever the
//! markup changes. Lookups that do not resolve to exactly one cell produce an
//! empty value list instead of an error.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{FinancialsResult, Snapshot, StatementPeriod};

const STATEMENT_TABLE_ID: &str = "fs-table";

/// Selectors and container-id patterns shared by every lookup, compiled once.
struct StatementPatterns {
    with_id: Selector,
    td: Selector,
    annual_container: Regex,
    quarterly_container: Regex,
}

impl StatementPatterns {
    fn compile() -> Option<Self> {
        Some(Self {
            with_id: Selector::parse("[id]").ok()?,
            td: Selector::parse("td").ok()?,
            annual_container: container_pattern(StatementPeriod::Annual)?,
            quarterly_container: container_pattern(StatementPeriod::Quarterly)?,
        })
    }

    fn container(&self, period: StatementPeriod) -> &Regex {
        match period {
            StatementPeriod::Annual => &self.annual_container,
            StatementPeriod::Quarterly => &self.quarterly_container,
        }
    }
}

fn container_pattern(period: StatementPeriod) -> Option<Regex> {
    Regex::new(&format!(r"(\w+){}(\w+)", period.id_token())).ok()
}

static STATEMENT_PATTERNS: LazyLock<Option<StatementPatterns>> =
    LazyLock::new(StatementPatterns::compile);

/// Locates the period values for one statement label in a parsed page.
pub trait FieldExtractor {
    /// `None` when the label does not resolve to exactly one cell.
    fn extract_field(
        &self,
        document: &Html,
        field: &str,
        period: StatementPeriod,
    ) -> Option<Vec<String>>;
}

/// Default heuristic: container whose id embeds the period token, then the
/// `fs-table` inside it, then the cell whose text equals the label; values are
/// the following `td` cells in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementTableExtractor;

impl FieldExtractor for StatementTableExtractor {
    fn extract_field(
        &self,
        document: &Html,
        field: &str,
        period: StatementPeriod,
    ) -> Option<Vec<String>> {
        let patterns = STATEMENT_PATTERNS.as_ref()?;
        let (with_id, td) = (&patterns.with_id, &patterns.td);
        let container_id = patterns.container(period);

        let mut matches = Vec::new();
        for container in document
            .select(with_id)
            .filter(|element| element.value().id().is_some_and(|id| container_id.is_match(id)))
        {
            for table in container
                .select(with_id)
                .filter(|element| element.value().id() == Some(STATEMENT_TABLE_ID))
            {
                for cell in table.select(td).filter(|cell| cell_text(cell) == field) {
                    if !matches.contains(&cell.id()) {
                        matches.push(cell.id());
                    }
                }
            }
        }

        let [label] = matches.as_slice() else {
            tracing::debug!(field, candidates = matches.len(), "statement label not uniquely matched");
            return None;
        };

        let values = document
            .select(td)
            .skip_while(|cell| cell.id() != *label)
            .skip(1)
            .take(period.column_count())
            .map(|cell| cell_text(&cell).replace(',', ""))
            .collect();
        Some(values)
    }
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_owned()
}

/// Extract every requested label with the default heuristic.
pub fn extract_financials(html: &str, fields: &[String], period: StatementPeriod) -> FinancialsResult {
    extract_financials_with(&StatementTableExtractor, html, fields, period)
}

/// Extract every requested label with a caller-supplied heuristic.
pub fn extract_financials_with(
    extractor: &dyn FieldExtractor,
    html: &str,
    fields: &[String],
    period: StatementPeriod,
) -> FinancialsResult {
    let document = Html::parse_document(html);
    fields
        .iter()
        .map(|field| {
            let values = extractor
                .extract_field(&document, field, period)
                .unwrap_or_default();
            (field.clone(), values)
        })
        .collect()
}

/// Label/value pairs of the `snap-data` summary table, or `None` when the
/// page has no such table (usually an unknown symbol).
pub fn extract_snapshot(html: &str) -> Option<Snapshot> {
    let table_selector = Selector::parse("table.snap-data").ok()?;
    let row_selector = Selector::parse("tr").ok()?;
    let td = Selector::parse("td").ok()?;

    let document = Html::parse_document(html);
    let table = document.select(&table_selector).next()?;

    let mut snapshot = Snapshot::new();
    for row in table.select(&row_selector) {
        let cells = row.select(&td).collect::<Vec<_>>();
        if let [label, value] = cells.as_slice() {
            snapshot.insert(cell_text(label), cell_text(value));
        }
    }
    Some(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENTS: &str = r#"
<html><body>
<div id="incinterimdiv">
  <table id="fs-table">
    <tr><td>In Millions of USD</td><td>Q4</td><td>Q3</td><td>Q2</td><td>Q1</td><td>Q0</td></tr>
    <tr><td class="lft">Total Revenue</td><td>1,100</td><td>1,000</td><td>900</td><td>800</td><td>700</td></tr>
  </table>
</div>
<div id="incannualdiv">
  <table id="fs-table">
    <tr><td>In Millions of USD</td><td>2010</td><td>2009</td><td>2008</td><td>2007</td></tr>
    <tr><td class="lft">Total Revenue
    </td><td>29,321.00</td><td>23,650.56</td><td>21,795.55</td><td>16,593.99</td></tr>
    <tr><td>Net Income</td><td>8,505.00</td><td>6,520.45</td><td>4,226.86</td><td>4,203.72</td></tr>
    <tr><td>Net Income</td><td>1</td><td>2</td><td>3</td><td>4</td></tr>
  </table>
</div>
</body></html>
"#;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn annual_values_strip_thousands_separators() {
        let result = extract_financials(STATEMENTS, &fields(&["Total Revenue"]), StatementPeriod::Annual);
        assert_eq!(
            result["Total Revenue"],
            vec!["29321.00", "23650.56", "21795.55", "16593.99"]
        );
    }

    #[test]
    fn quarterly_values_use_interim_container() {
        let result =
            extract_financials(STATEMENTS, &fields(&["Total Revenue"]), StatementPeriod::Quarterly);
        assert_eq!(result["Total Revenue"], vec!["1100", "1000", "900", "800", "700"]);
    }

    #[test]
    fn unmatched_and_ambiguous_fields_are_empty() {
        let result = extract_financials(
            STATEMENTS,
            &fields(&["Gross Profit", "Net Income"]),
            StatementPeriod::Annual,
        );
        assert_eq!(result.len(), 2);
        assert!(result["Gross Profit"].is_empty());
        assert!(result["Net Income"].is_empty(), "duplicate label is ambiguous");
    }

    #[test]
    fn shared_patterns_select_the_period_container() {
        let patterns = STATEMENT_PATTERNS.as_ref().expect("patterns compile");

        assert!(patterns.container(StatementPeriod::Annual).is_match("incannualdiv"));
        assert!(!patterns.container(StatementPeriod::Annual).is_match("incinterimdiv"));
        assert!(patterns.container(StatementPeriod::Quarterly).is_match("incinterimdiv"));
    }

    #[test]
    fn many_fields_resolve_against_one_parsed_page() {
        let result = extract_financials(
            STATEMENTS,
            &fields(&["Total Revenue", "Gross Profit", "Total Revenue"]),
            StatementPeriod::Annual,
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result["Total Revenue"][0], "29321.00");
        assert!(result["Gross Profit"].is_empty());
    }

    #[test]
    fn page_without_statements_yields_empty_values() {
        let result = extract_financials("<html></html>", &fields(&["Total Revenue"]), StatementPeriod::Annual);
        assert!(result["Total Revenue"].is_empty());
    }

    #[test]
    fn custom_extractor_is_used() {
        struct Fixed;
        impl FieldExtractor for Fixed {
            fn extract_field(&self, _: &Html, field: &str, _: StatementPeriod) -> Option<Vec<String>> {
                Some(vec![field.to_uppercase()])
            }
        }

        let result = extract_financials_with(&Fixed, "", &fields(&["eps"]), StatementPeriod::Annual);
        assert_eq!(result["eps"], vec!["EPS"]);
    }

    #[test]
    fn snapshot_reads_two_cell_rows() {
        let page = r#"<table class="snap-data">
            <tr><td class="key">Range</td><td class="val">30.00 - 31.00</td></tr>
            <tr><td class="key">Mkt cap</td><td class="val">181.52B</td></tr>
            <tr><td colspan="2">footer</td></tr>
        </table>"#;
        let snapshot = extract_snapshot(page).expect("table present");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["Mkt cap"], "181.52B");
    }

    #[test]
    fn snapshot_missing_table_is_none() {
        assert!(extract_snapshot("<html><body>Not found</body></html>").is_none());
    }
}
