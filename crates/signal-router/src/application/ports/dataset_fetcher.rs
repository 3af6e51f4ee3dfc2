use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{SignalDataset, Ticker};

/// Placeholder substituted with the ticker in endpoint templates
pub const TICKER_PLACEHOLDER: &str = "{ticker}";

/// Upstream path with a `{ticker}` placeholder, e.g. `/v1/signals/{ticker}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    pub fn new(path: impl Into<String>) -> Self {
        EndpointTemplate(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_placeholder(&self) -> bool {
        self.0.contains(TICKER_PLACEHOLDER)
    }

    /// Non-empty template segments with the placeholder replaced by `ticker_segment`
    ///
    /// The caller encodes `ticker_segment`; it is inserted verbatim.
    pub fn segments(&self, ticker_segment: &str) -> Vec<String> {
        self.0
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| s.replace(TICKER_PLACEHOLDER, ticker_segment))
            .collect()
    }
}

impl fmt::Display for EndpointTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of per-ticker provider feeds
///
/// Free and priced endpoints share this contract. Every failure (payment
/// required, no-data sentinel, deprecated endpoint, bad status, network error,
/// timeout) surfaces as `None`, so callers cannot tell them apart.
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    async fn fetch(&self, endpoint: &EndpointTemplate, ticker: &Ticker) -> Option<SignalDataset>;
}
