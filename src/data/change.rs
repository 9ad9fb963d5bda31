#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRecord {
    pub ticker: String,
    pub company: String,
    pub prior_close: f64,
    pub latest_close: f64,
    pub percent_change: f64,
}

impl ChangeRecord {
    /// Percent change as shown in the table, rounded to cents of a percent.
    pub fn display_change(&self) -> f64 {
        round2(self.percent_change)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
