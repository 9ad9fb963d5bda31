mod cycle;
mod logger;

pub use cycle::run_cycle;
pub use logger::init_logging;

use std::time::Duration;

use chrono::Local;
use color_eyre::Result;
use log::{error, info, warn};
use tokio::sync::mpsc;

use crate::calc::CycleReport;
use crate::config::{FETCH_CONCURRENCY, LOOKBACK_DAYS, REFRESH_INTERVAL_SECS};
use crate::refresh::RefreshTrigger;
use crate::request::{
    PriceSource, RosterCache, RosterSource, WikipediaRoster, YahooPrices, http_client,
};
use crate::ui::TuiApp;

/// Result of one cycle as seen by the UI. Errors arrive already formatted.
pub type CycleOutcome = std::result::Result<CycleReport, String>;

#[derive(Debug, Clone)]
pub struct App {
    lookback_days: u32,
    concurrency: usize,
    refresh_interval: Duration,
}

impl App {
    pub fn new() -> Self {
        Self {
            lookback_days: LOOKBACK_DAYS,
            concurrency: FETCH_CONCURRENCY,
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let client = http_client()?;
        let roster = RosterCache::new(WikipediaRoster::new(client.clone()));
        let prices = YahooPrices::new(client, self.concurrency);

        let (request_tx, request_rx) = mpsc::unbounded_channel::<RefreshTrigger>();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<CycleOutcome>();

        info!(
            "Starting: lookback {}d, refresh every {}s, {} concurrent requests",
            self.lookback_days,
            self.refresh_interval.as_secs(),
            self.concurrency
        );
        let worker = tokio::spawn(cycle_worker(
            roster,
            prices,
            self.lookback_days,
            request_rx,
            outcome_tx,
        ));

        let ui_task = tokio::task::spawn_blocking(move || {
            let terminal = ratatui::init();
            let app = TuiApp::new(request_tx);
            let app_result = app.run(terminal, outcome_rx);
            ratatui::restore();
            app_result
        });

        let ui_result = ui_task.await?;

        worker.abort();
        if let Err(e) = &ui_result {
            error!("UI exited with error: {e}");
        }
        ui_result
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs cycles one at a time as the UI asks for them.
async fn cycle_worker<R, P>(
    mut roster: RosterCache<R>,
    prices: P,
    lookback_days: u32,
    mut requests: mpsc::UnboundedReceiver<RefreshTrigger>,
    outcomes: mpsc::UnboundedSender<CycleOutcome>,
) where
    R: RosterSource,
    P: PriceSource,
{
    while let Some(trigger) = requests.recv().await {
        if trigger == RefreshTrigger::RosterReload {
            roster.invalidate();
        }

        let today = Local::now().date_naive();
        let outcome = run_cycle(&mut roster, &prices, lookback_days, today)
            .await
            .map_err(|e| {
                warn!("Cycle ({trigger:?}) failed: {e}");
                e.to_string()
            });

        if outcomes.send(outcome).is_err() {
            break;
        }
    }
    info!("Cycle worker stopped");
}
