use chrono::NaiveDate;
use log::info;

use crate::calc::CycleReport;
use crate::error::Result;
use crate::request::{PriceSource, RosterCache, RosterSource};

/// One full pass: cached roster, fresh prices, change calculation.
/// Only a roster failure aborts the cycle; price problems become skips.
pub async fn run_cycle<R, P>(
    roster: &mut RosterCache<R>,
    prices: &P,
    lookback_days: u32,
    today: NaiveDate,
) -> Result<CycleReport>
where
    R: RosterSource,
    P: PriceSource,
{
    let roster = roster.get().await?;
    let symbols: Vec<String> = roster.iter().map(|s| s.ticker.clone()).collect();

    let windows = prices.fetch_window(&symbols, lookback_days).await;
    let fetched = windows.values().filter(|w| w.is_ok()).count();
    info!("Fetched {}/{} price windows", fetched, symbols.len());

    let report = CycleReport::build(&roster, &windows, today);
    info!(
        "Cycle for {} vs {}: {} computed, skipped {:?}",
        report.today,
        report.yesterday,
        report.records.len(),
        report.skip_counts()
    );
    Ok(report)
}
