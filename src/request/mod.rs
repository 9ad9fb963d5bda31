mod client;
mod prices;
mod roster;

pub use client::http_client;
pub use prices::{FetchedPrices, PriceSource, YahooPrices};
pub use roster::{RosterCache, RosterSource, WikipediaRoster};
