//! Change calculation for one cycle.
//!
//! Dates are plain calendar dates: `today` and `yesterday` must both have a
//! bar in the window or the symbol is skipped. On weekends and market
//! holidays that excludes nearly everything.

mod rank;
mod report;

pub use rank::{Ranked, rank};
pub use report::{CycleReport, SkipKind};

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::{ChangeRecord, PriceWindow, SymbolRecord};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("price fetch failed: {0}")]
    NotFetched(String),

    #[error("no close on {0}")]
    MissingDate(NaiveDate),

    #[error("prior close is zero or not finite")]
    DegeneratePrice,

    #[error("latest close is not finite")]
    NonFiniteClose,
}

pub fn compute(
    symbol: &SymbolRecord,
    window: &PriceWindow,
    today: NaiveDate,
    yesterday: NaiveDate,
) -> Result<ChangeRecord, SkipReason> {
    let latest_close = window
        .close_on(today)
        .ok_or(SkipReason::MissingDate(today))?;
    let prior_close = window
        .close_on(yesterday)
        .ok_or(SkipReason::MissingDate(yesterday))?;

    if prior_close == 0.0 || !prior_close.is_finite() {
        return Err(SkipReason::DegeneratePrice);
    }
    if !latest_close.is_finite() {
        return Err(SkipReason::NonFiniteClose);
    }

    Ok(ChangeRecord {
        ticker: symbol.ticker.clone(),
        company: symbol.company.clone(),
        prior_close,
        latest_close,
        percent_change: (latest_close - prior_close) / prior_close * 100.0,
    })
}
