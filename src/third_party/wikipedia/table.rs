//! Extraction of the constituents table from the roster page.
//!
//! The first `<table>` in the document is taken as the roster. If it lacks
//! the symbol or company column, the whole roster is rejected.

use scraper::{ElementRef, Html, Selector};

use super::api_path::{COMPANY_COLUMN, SYMBOL_COLUMN};
use crate::data::SymbolRecord;
use crate::error::{Error, Result};

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| Error::SourceUnavailable(format!("invalid selector {css}: {e:?}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

pub fn parse_constituents(html: &str) -> Result<Vec<SymbolRecord>> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let header_selector = selector("th")?;
    let cell_selector = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| Error::SourceUnavailable("no table on roster page".to_string()))?;

    let mut rows = table.select(&row_selector);
    let header: Vec<String> = rows
        .by_ref()
        .map(|row| row.select(&header_selector).map(cell_text).collect::<Vec<_>>())
        .find(|cells| !cells.is_empty())
        .ok_or_else(|| Error::SourceUnavailable("roster table has no header".to_string()))?;

    let column = |name: &str| {
        header.iter().position(|h| h == name).ok_or_else(|| {
            Error::SourceUnavailable(format!("roster table has no '{name}' column"))
        })
    };
    let symbol_idx = column(SYMBOL_COLUMN)?;
    let company_idx = column(COMPANY_COLUMN)?;

    let roster: Vec<SymbolRecord> = rows
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
            let ticker = cells.get(symbol_idx)?;
            let company = cells.get(company_idx)?;
            (!ticker.is_empty()).then(|| SymbolRecord::new(ticker.as_str(), company.as_str()))
        })
        .collect();

    if roster.is_empty() {
        return Err(Error::SourceUnavailable(
            "roster table has no rows".to_string(),
        ));
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="wikitable" id="constituents">
          <tbody>
            <tr><th>Symbol</th><th>Security</th><th>GICS Sector</th></tr>
            <tr><td><a href="/x">MMM</a></td><td><a href="/y">3M</a></td><td>Industrials</td></tr>
            <tr><td><a href="/x">BRK.B</a></td><td>Berkshire Hathaway</td><td>Financials</td></tr>
            <tr><td>AOS</td><td> A. O. Smith </td><td>Industrials</td></tr>
          </tbody>
        </table>
        <table><tr><th>Date</th><th>Added</th></tr><tr><td>x</td><td>y</td></tr></table>
        </body></html>
    "#;

    #[test]
    fn reads_first_table_in_order() {
        let roster = parse_constituents(PAGE).unwrap();
        assert_eq!(
            roster,
            vec![
                SymbolRecord::new("MMM", "3M"),
                SymbolRecord::new("BRK.B", "Berkshire Hathaway"),
                SymbolRecord::new("AOS", "A. O. Smith"),
            ]
        );
    }

    #[test]
    fn missing_table_is_source_unavailable() {
        let err = parse_constituents("<html><body><p>moved</p></body></html>").unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    #[test]
    fn changed_columns_are_source_unavailable() {
        let page = "<table><tr><th>Ticker</th><th>Name</th></tr><tr><td>A</td><td>B</td></tr></table>";
        let err = parse_constituents(page).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(msg) if msg.contains("Symbol")));
    }

    #[test]
    fn header_only_table_is_source_unavailable() {
        let page = "<table><tr><th>Symbol</th><th>Security</th></tr></table>";
        assert!(matches!(
            parse_constituents(page),
            Err(Error::SourceUnavailable(_))
        ));
    }
}
