//! Errors raised while talking to the roster and price sources.
//!
//! Per-symbol problems never surface here; they are folded into
//! [`SkipReason`](crate::calc::SkipReason) by the change calculator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The roster page could not be retrieved or no longer has the expected table.
    #[error("roster source unavailable: {0}")]
    SourceUnavailable(String),

    /// The price provider answered, but with an error payload or no series.
    #[error("price request for {symbol} rejected: {message}")]
    PriceRejected { symbol: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
