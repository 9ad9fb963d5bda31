use std::collections::HashMap;
use std::future::Future;

use anyhow::{Context, anyhow};
use futures::{StreamExt, stream};
use log::debug;

use crate::data::PriceWindow;
use crate::third_party::yahoo::api_path::{YAHOO_CHART_API, chart_url};
use crate::third_party::yahoo::data::ChartResponse;

/// Per-symbol result of one batch. A failed symbol carries the error text.
pub type FetchedPrices = HashMap<String, Result<PriceWindow, String>>;

pub trait PriceSource {
    fn fetch_window(
        &self,
        symbols: &[String],
        lookback_days: u32,
    ) -> impl Future<Output = FetchedPrices> + Send;
}

pub struct YahooPrices {
    client: reqwest::Client,
    chart_api: String,
    concurrency: usize,
}

impl YahooPrices {
    pub fn new(client: reqwest::Client, concurrency: usize) -> Self {
        Self {
            client,
            chart_api: YAHOO_CHART_API.to_string(),
            concurrency: concurrency.max(1),
        }
    }

    pub fn with_chart_api(mut self, chart_api: impl Into<String>) -> Self {
        self.chart_api = chart_api.into();
        self
    }

    async fn fetch_one(&self, ticker: &str, lookback_days: u32) -> anyhow::Result<PriceWindow> {
        let url = chart_url(&self.chart_api, ticker, lookback_days);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;
        let status = response.status();
        let body = response.text().await?;

        match ChartResponse::parse(&body) {
            Ok(chart) => {
                let window = chart.into_window(ticker)?;
                if window.is_empty() {
                    debug!("{ticker}: no bars in window");
                }
                Ok(window)
            }
            Err(_) if !status.is_success() => Err(anyhow!("HTTP {status}")),
            Err(e) => Err(e).context("decoding chart payload"),
        }
    }
}

impl PriceSource for YahooPrices {
    async fn fetch_window(&self, symbols: &[String], lookback_days: u32) -> FetchedPrices {
        stream::iter(symbols.iter().cloned())
            .map(|ticker| async move {
                let window = self
                    .fetch_one(&ticker, lookback_days)
                    .await
                    .map_err(|e| format!("{e:#}"));
                if let Err(message) = &window {
                    debug!("price fetch failed for {ticker}: {message}");
                }
                (ticker, window)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }
}
