use const_format::concatcp;

// Root
pub const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com";

// Paths
pub const YAHOO_CHART_API_PATH: &str = "/v8/finance/chart/";

// Endpoints
pub const YAHOO_CHART_API: &str = concatcp!(YAHOO_API_URL, YAHOO_CHART_API_PATH);

pub const DAILY_INTERVAL: &str = "1d";

/// Roster symbols write share classes with a dot (`BRK.B`); the chart API wants a dash.
pub fn provider_symbol(ticker: &str) -> String {
    ticker.replace('.', "-")
}

/// `chart_api` is normally [`YAHOO_CHART_API`].
pub fn chart_url(chart_api: &str, ticker: &str, lookback_days: u32) -> String {
    format!(
        "{}{}?range={}d&interval={}",
        chart_api,
        provider_symbol(ticker),
        lookback_days,
        DAILY_INTERVAL
    )
}
