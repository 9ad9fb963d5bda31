#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolRecord {
    pub ticker: String,
    pub company: String,
}

impl SymbolRecord {
    pub fn new(ticker: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company: company.into(),
        }
    }
}
