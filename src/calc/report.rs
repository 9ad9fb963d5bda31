use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};
use log::debug;

use super::{SkipReason, compute};
use crate::data::{ChangeRecord, PriceWindow, SymbolRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkipKind {
    NotFetched,
    MissingDate,
    DegeneratePrice,
    NonFiniteClose,
}

impl From<&SkipReason> for SkipKind {
    fn from(reason: &SkipReason) -> Self {
        match reason {
            SkipReason::NotFetched(_) => SkipKind::NotFetched,
            SkipReason::MissingDate(_) => SkipKind::MissingDate,
            SkipReason::DegeneratePrice => SkipKind::DegeneratePrice,
            SkipReason::NonFiniteClose => SkipKind::NonFiniteClose,
        }
    }
}

/// Outcome of one cycle: every roster symbol ends up either in `records` or in `skipped`.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleReport {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    pub records: Vec<ChangeRecord>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl CycleReport {
    /// Runs the calculator over the roster. Symbols missing from `windows`
    /// were dropped by the batch and count as not fetched.
    pub fn build(
        roster: &[SymbolRecord],
        windows: &HashMap<String, Result<PriceWindow, String>>,
        today: NaiveDate,
    ) -> Self {
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for symbol in roster {
            let outcome = match windows.get(&symbol.ticker) {
                None => Err(SkipReason::NotFetched("absent from batch".to_string())),
                Some(Err(message)) => Err(SkipReason::NotFetched(message.clone())),
                Some(Ok(window)) => compute(symbol, window, today, yesterday),
            };
            match outcome {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!("skipping {}: {}", symbol.ticker, reason);
                    skipped.push((symbol.ticker.clone(), reason));
                }
            }
        }

        Self {
            today,
            yesterday,
            records,
            skipped,
        }
    }

    pub fn skip_counts(&self) -> BTreeMap<SkipKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, reason) in &self.skipped {
            *counts.entry(SkipKind::from(reason)).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceBar;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn two_day(prior: f64, latest: f64) -> Result<PriceWindow, String> {
        Ok(PriceWindow::new(vec![
            PriceBar {
                date: day(4),
                close: Some(prior),
            },
            PriceBar {
                date: day(5),
                close: Some(latest),
            },
        ]))
    }

    #[test]
    fn every_symbol_is_accounted_for() {
        let roster = vec![
            SymbolRecord::new("AAA", "Alpha"),
            SymbolRecord::new("BBB", "Beta"),
            SymbolRecord::new("CCC", "Gamma"),
            SymbolRecord::new("DDD", "Delta"),
            SymbolRecord::new("EEE", "Epsilon"),
            SymbolRecord::new("FFF", "Phi"),
        ];
        let mut windows = HashMap::new();
        windows.insert("AAA".to_string(), two_day(100.0, 110.0));
        windows.insert("BBB".to_string(), two_day(50.0, 45.0));
        windows.insert(
            "CCC".to_string(),
            Ok(PriceWindow::new(vec![PriceBar {
                date: day(5),
                close: Some(1.0),
            }])),
        );
        windows.insert("DDD".to_string(), two_day(0.0, 1.0));
        windows.insert("EEE".to_string(), Err("404 Not Found".to_string()));

        let report = CycleReport::build(&roster, &windows, day(5));

        assert_eq!(report.yesterday, day(4));
        let computed: Vec<_> = report.records.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(computed, ["AAA", "BBB"]);
        assert_eq!(report.records.len() + report.skipped.len(), roster.len());

        let counts = report.skip_counts();
        assert_eq!(counts.get(&SkipKind::MissingDate), Some(&1));
        assert_eq!(counts.get(&SkipKind::DegeneratePrice), Some(&1));
        assert_eq!(counts.get(&SkipKind::NotFetched), Some(&2));
        assert_eq!(counts.get(&SkipKind::NonFiniteClose), None);
    }

    #[test]
    fn weekend_run_excludes_everything() {
        let roster = vec![SymbolRecord::new("AAA", "Alpha")];
        let mut windows = HashMap::new();
        windows.insert("AAA".to_string(), two_day(100.0, 110.0));

        // 2024-03-10 is a Sunday; the window ends on Tuesday the 5th.
        let report = CycleReport::build(&roster, &windows, day(10));
        assert!(report.records.is_empty());
        assert_eq!(report.skip_counts().get(&SkipKind::MissingDate), Some(&1));
    }
}
