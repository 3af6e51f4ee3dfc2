use async_trait::async_trait;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::application::ports::{DatasetFetcher, EndpointTemplate};
use crate::domain::{SignalDataset, Ticker};

/// Bytes escaped in the ticker segment. `\` counts as a path separator in
/// http(s) URLs, so it is escaped along with the URL delimiters.
const TICKER_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Why an upstream feed was unavailable. Only logged; the port reports `None`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("payment required")]
    PaymentRequired,
    #[error("endpoint deprecated")]
    Deprecated,
    #[error("no data for ticker")]
    NoData,
    #[error("unexpected status: {0}")]
    Status(StatusCode),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("invalid upstream URL: {0}")]
    Url(String),
    #[error("ticker {0:?} does not fit in a URL path segment")]
    UnroutableTicker(String),
}

impl FetchError {
    /// Outcomes announced on purpose by the provider, plus tickers no URL can carry
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            FetchError::PaymentRequired
                | FetchError::Deprecated
                | FetchError::NoData
                | FetchError::UnroutableTicker(_)
        )
    }
}

/// SigmaGrid REST client
///
/// One `reqwest::Client` (carrying the per-request timeout) is shared by every
/// fetch; it holds no per-request state.
#[derive(Clone)]
pub struct HttpDatasetFetcher {
    client: Client,
    base_url: Url,
}

impl HttpDatasetFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Url(format!("{} cannot be a base URL", base_url)));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(HttpDatasetFetcher { client, base_url })
    }

    /// Full URL for `endpoint`
    ///
    /// The ticker is percent-encoded into its own path segment. A segment that
    /// would come out empty, `.` or `..` is refused, since URL normalization
    /// would drop or collapse it and the request would hit a different path.
    pub fn endpoint_url(
        &self,
        endpoint: &EndpointTemplate,
        ticker: &Ticker,
    ) -> Result<Url, FetchError> {
        let encoded = utf8_percent_encode(ticker.as_str(), TICKER_SEGMENT).to_string();

        let mut path = self.base_url.path().trim_end_matches('/').to_string();
        for segment in endpoint.segments(&encoded) {
            if matches!(segment.as_str(), "" | "." | "..") {
                return Err(FetchError::UnroutableTicker(ticker.as_str().to_string()));
            }
            path.push('/');
            path.push_str(&segment);
        }

        let mut url = self.base_url.clone();
        url.set_path(&path);
        Ok(url)
    }

    /// Fetch one feed, keeping the reason when it is unavailable
    pub async fn try_fetch(
        &self,
        endpoint: &EndpointTemplate,
        ticker: &Ticker,
    ) -> Result<SignalDataset, FetchError> {
        let url = self.endpoint_url(endpoint, ticker)?;
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        match status {
            StatusCode::PAYMENT_REQUIRED => return Err(FetchError::PaymentRequired),
            StatusCode::GONE => return Err(FetchError::Deprecated),
            s if !s.is_success() => return Err(FetchError::Status(s)),
            _ => {}
        }

        let body = resp.bytes().await?;
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let dataset = SignalDataset::from_value(value).ok_or(FetchError::NotAnObject)?;

        if dataset.is_no_data() {
            return Err(FetchError::NoData);
        }

        Ok(dataset)
    }
}

#[async_trait]
impl DatasetFetcher for HttpDatasetFetcher {
    async fn fetch(&self, endpoint: &EndpointTemplate, ticker: &Ticker) -> Option<SignalDataset> {
        match self.try_fetch(endpoint, ticker).await {
            Ok(dataset) => Some(dataset),
            Err(e) if e.is_expected() => {
                debug!(%endpoint, %ticker, reason = %e, "Feed unavailable");
                None
            }
            Err(e) => {
                warn!(%endpoint, %ticker, error = %e, "Feed fetch failed");
                None
            }
        }
    }
}
