use std::future::Future;
use std::sync::Arc;

use log::info;

use crate::data::SymbolRecord;
use crate::error::{Error, Result};
use crate::third_party::wikipedia::api_path::SP500_CONSTITUENTS_URL;
use crate::third_party::wikipedia::table::parse_constituents;

pub trait RosterSource {
    fn fetch_roster(&self) -> impl Future<Output = Result<Vec<SymbolRecord>>> + Send;
}

pub struct WikipediaRoster {
    client: reqwest::Client,
    url: String,
}

impl WikipediaRoster {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: SP500_CONSTITUENTS_URL.to_string(),
        }
    }

    async fn page(&self) -> reqwest::Result<String> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl RosterSource for WikipediaRoster {
    async fn fetch_roster(&self) -> Result<Vec<SymbolRecord>> {
        let html = self
            .page()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("{}: {}", self.url, e)))?;
        parse_constituents(&html)
    }
}

/// Roster fetched once and reused until [`RosterCache::invalidate`] is called.
/// A failed fetch leaves nothing cached, so the next cycle tries again.
pub struct RosterCache<S> {
    source: S,
    roster: Option<Arc<Vec<SymbolRecord>>>,
}

impl<S: RosterSource> RosterCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            roster: None,
        }
    }

    pub async fn get(&mut self) -> Result<Arc<Vec<SymbolRecord>>> {
        if let Some(roster) = &self.roster {
            return Ok(Arc::clone(roster));
        }

        let roster = Arc::new(self.source.fetch_roster().await?);
        info!("Roster loaded: {} symbols", roster.len());
        self.roster = Some(Arc::clone(&roster));
        Ok(roster)
    }

    pub fn invalidate(&mut self) {
        if self.roster.take().is_some() {
            info!("Roster cache invalidated");
        }
    }

    pub fn is_cached(&self) -> bool {
        self.roster.is_some()
    }
}
