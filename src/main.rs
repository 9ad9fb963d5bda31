//! S&P 500 daily movers
//!
//! Terminal table of the day's top gainers and losers, comparing each
//! constituent's close today with its close yesterday. Refreshes every minute.

pub mod app;
pub mod calc;
pub mod config;
pub mod data;
pub mod error;
pub mod refresh;
pub mod request;
pub mod third_party;
pub mod ui;

use crate::app::{App, init_logging};
use color_eyre::Result;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let app = App::new();
    app.run().await
}
