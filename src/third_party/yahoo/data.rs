use chrono::DateTime;
use log::debug;
use serde::Deserialize;

use crate::data::{PriceBar, PriceWindow};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    /// Seconds east of UTC for the listing exchange.
    #[serde(default)]
    pub gmtoffset: i64,
    pub exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSeries {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResponse {
    pub fn parse(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Daily closes keyed by the exchange-local calendar date of each bar.
    pub fn into_window(self, ticker: &str) -> Result<PriceWindow> {
        if let Some(error) = self.chart.error {
            return Err(Error::PriceRejected {
                symbol: ticker.to_string(),
                message: format!("{}: {}", error.code, error.description),
            });
        }

        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| Error::PriceRejected {
                symbol: ticker.to_string(),
                message: "empty chart result".to_string(),
            })?;

        let offset = result.meta.gmtoffset;
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|series| series.close)
            .unwrap_or_default();

        let bars = result
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let date = DateTime::from_timestamp(ts.checked_add(offset)?, 0)?.date_naive();
                let close = closes.get(i).copied().flatten();
                Some(PriceBar { date, close })
            })
            .collect();

        let window = PriceWindow::new(bars);
        debug!(
            "{} -> {} ({}), {} bars",
            ticker,
            result.meta.symbol,
            result.meta.exchange_timezone_name.as_deref().unwrap_or("UTC"),
            window.bars().len()
        );
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-03-04/05/06 14:30 UTC, New York open.
    const PAYLOAD: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "currency": "USD",
                    "symbol": "AAA",
                    "gmtoffset": -18000,
                    "exchangeTimezoneName": "America/New_York"
                },
                "timestamp": [1709562600, 1709649000, 1709735400],
                "indicators": {
                    "quote": [{
                        "open": [99.0, 100.5, null],
                        "high": [101.0, 111.0, null],
                        "low": [98.0, 100.0, null],
                        "close": [100.0, 110.0, null],
                        "volume": [1000, 2000, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn decodes_bars_with_exchange_dates() {
        let response: ChartResponse = serde_json::from_str(PAYLOAD).unwrap();
        let window = response.into_window("AAA").unwrap();

        assert_eq!(
            window.bars(),
            &[
                PriceBar {
                    date: day(4),
                    close: Some(100.0),
                },
                PriceBar {
                    date: day(5),
                    close: Some(110.0),
                },
                PriceBar {
                    date: day(6),
                    close: None,
                },
            ]
        );
    }

    #[test]
    fn error_payload_is_rejected() {
        let payload = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let response: ChartResponse = serde_json::from_str(payload).unwrap();

        let err = response.into_window("ZZZ").unwrap_err();
        assert!(matches!(err, Error::PriceRejected { ref symbol, .. } if symbol == "ZZZ"));
        assert!(err.to_string().contains("delisted"));
    }

    #[test]
    fn overflowing_timestamps_are_dropped() {
        let payload = r#"{"chart":{"result":[{"meta":{"symbol":"ODD","gmtoffset":1},"timestamp":[9223372036854775807,1709649000],"indicators":{"quote":[{"close":[1.0,2.0]}]}}],"error":null}}"#;
        let window = ChartResponse::parse(payload).unwrap().into_window("ODD").unwrap();

        assert_eq!(
            window.bars(),
            &[PriceBar {
                date: day(5),
                close: Some(2.0),
            }]
        );
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        assert!(matches!(
            ChartResponse::parse("<html>Not Found</html>"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn missing_timestamps_give_empty_window() {
        let payload = r#"{"chart":{"result":[{"meta":{"symbol":"NEW","gmtoffset":0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let response: ChartResponse = serde_json::from_str(payload).unwrap();

        assert!(response.into_window("NEW").unwrap().is_empty());
    }
}
