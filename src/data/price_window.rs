use chrono::NaiveDate;

/// One daily bar. `close` is `None` when the provider reported no value.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

/// Daily closes for a single symbol, in the order the provider returned them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceWindow {
    bars: Vec<PriceBar>,
}

impl PriceWindow {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars with a close present, order preserved.
    pub fn closes(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.bars
            .iter()
            .filter_map(|bar| bar.close.map(|close| (bar.date, close)))
    }

    /// First close recorded on `date`, ignoring bars without a close.
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.closes().find(|(d, _)| *d == date).map(|(_, close)| close)
    }
}
