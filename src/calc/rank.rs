use std::cmp::Ordering;

use itertools::Itertools;

use crate::data::ChangeRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranked {
    pub gainers: Vec<ChangeRecord>,
    pub losers: Vec<ChangeRecord>,
}

/// Splits records into gainers (largest rise first) and losers (largest drop
/// first), each cut to `top_n`. Sign and order follow the change as displayed
/// (two decimals), so a move that rounds to 0.00% lands in neither list.
/// Equal displayed changes are ordered by ticker so the result is deterministic.
pub fn rank(records: &[ChangeRecord], top_n: usize) -> Ranked {
    let gainers = records
        .iter()
        .filter(|r| r.display_change() > 0.0)
        .sorted_by(|a, b| by_change(b, a).then_with(|| a.ticker.cmp(&b.ticker)))
        .take(top_n)
        .cloned()
        .collect();

    let losers = records
        .iter()
        .filter(|r| r.display_change() < 0.0)
        .sorted_by(|a, b| by_change(a, b).then_with(|| a.ticker.cmp(&b.ticker)))
        .take(top_n)
        .cloned()
        .collect();

    Ranked { gainers, losers }
}

fn by_change(a: &ChangeRecord, b: &ChangeRecord) -> Ordering {
    a.display_change().total_cmp(&b.display_change())
}
