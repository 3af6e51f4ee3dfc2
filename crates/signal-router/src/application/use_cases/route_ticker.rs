use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::application::ports::{Clock, DatasetFetcher, EndpointTemplate};
use crate::domain::{RoutingDecision, SignalDataset, Ticker, decide};

/// Upstream endpoints queried for every ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalEndpoints {
    /// Free teaser feed (regime + event-risk labels)
    pub signals: EndpointTemplate,
    /// Priced fair-value feed
    pub fair_value: EndpointTemplate,
    /// Priced cross-venue spread feed
    pub spread: EndpointTemplate,
}

impl Default for SignalEndpoints {
    fn default() -> Self {
        SignalEndpoints {
            signals: EndpointTemplate::new("/v1/signals/{ticker}"),
            fair_value: EndpointTemplate::new("/v1/fair-value/{ticker}"),
            spread: EndpointTemplate::new("/v1/spread/{ticker}"),
        }
    }
}

impl SignalEndpoints {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &EndpointTemplate)> {
        [
            ("signals", &self.signals),
            ("fair_value", &self.fair_value),
            ("spread", &self.spread),
        ]
        .into_iter()
    }
}

/// Whatever feeds were available for one ticker
#[derive(Debug, Clone, Default)]
pub struct SignalBundle {
    pub signals: Option<SignalDataset>,
    pub fair_value: Option<SignalDataset>,
    pub spread: Option<SignalDataset>,
}

pub struct RouteTickerUseCase<F, C>
where
    F: DatasetFetcher,
    C: Clock,
{
    fetcher: Arc<F>,
    clock: Arc<C>,
    endpoints: SignalEndpoints,
}

impl<F, C> RouteTickerUseCase<F, C>
where
    F: DatasetFetcher,
    C: Clock,
{
    pub fn new(fetcher: Arc<F>, clock: Arc<C>, endpoints: SignalEndpoints) -> Self {
        Self {
            fetcher,
            clock,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &SignalEndpoints {
        &self.endpoints
    }

    /// Query all three feeds concurrently and wait for every one of them
    pub async fn fetch_bundle(&self, ticker: &Ticker) -> SignalBundle {
        let (signals, fair_value, spread) = tokio::join!(
            self.fetcher.fetch(&self.endpoints.signals, ticker),
            self.fetcher.fetch(&self.endpoints.fair_value, ticker),
            self.fetcher.fetch(&self.endpoints.spread, ticker),
        );

        SignalBundle {
            signals,
            fair_value,
            spread,
        }
    }

    /// Fetch, decide and stamp. Never fails: missing data is encoded in the decision.
    pub async fn execute(&self, ticker: &Ticker) -> RoutingDecision {
        let span = info_span!("route", request_id = %Uuid::new_v4(), ticker = %ticker);

        async {
            let bundle = self.fetch_bundle(ticker).await;
            debug!(
                signals = bundle.signals.is_some(),
                fair_value = bundle.fair_value.is_some(),
                spread = bundle.spread.is_some(),
                "Upstream feeds collected"
            );

            let decision = decide(
                bundle.signals.as_ref(),
                bundle.fair_value.as_ref(),
                bundle.spread.as_ref(),
            );
            info!(
                action = %decision.action,
                confidence = decision.confidence,
                "Routing decision made"
            );

            RoutingDecision::new(ticker, decision, bundle.signals, self.clock.now())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, NO_DATA_ERROR};
    use crate::infrastructure::FixedClock;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves canned payloads keyed by endpoint template and records lookups
    #[derive(Default)]
    struct StubFetcher {
        payloads: HashMap<String, SignalDataset>,
        delay: Option<Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn with(mut self, template: &str, payload: serde_json::Value) -> Self {
            self.payloads.insert(
                template.to_string(),
                SignalDataset::from_value(payload).unwrap(),
            );
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl DatasetFetcher for StubFetcher {
        async fn fetch(
            &self,
            endpoint: &EndpointTemplate,
            ticker: &Ticker,
        ) -> Option<SignalDataset> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{}:{}", endpoint, ticker.as_str()));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.payloads.get(endpoint.as_str()).cloned()
        }
    }

    fn use_case(fetcher: StubFetcher) -> RouteTickerUseCase<StubFetcher, FixedClock> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap());
        RouteTickerUseCase::new(
            Arc::new(fetcher),
            Arc::new(clock),
            SignalEndpoints::default(),
        )
    }

    #[tokio::test]
    async fn test_queries_all_three_feeds_with_raw_ticker() {
        let uc = use_case(StubFetcher::default());
        let ticker = Ticker::new("tsla");

        let decision = uc.execute(&ticker).await;
        assert_eq!(decision.ticker, "TSLA");

        let mut calls = uc.fetcher.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "/v1/fair-value/{ticker}:tsla",
                "/v1/signals/{ticker}:tsla",
                "/v1/spread/{ticker}:tsla",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_signals_yields_error_record() {
        let fetcher = StubFetcher::default()
            .with("/v1/fair-value/{ticker}", json!({"fair_value": 598.42, "confidence": 0.9}))
            .with("/v1/spread/{ticker}", json!({"arbitrage_flag": true}));
        let uc = use_case(fetcher);

        let decision = uc.execute(&Ticker::new("spy")).await;
        assert_eq!(decision.action, Action::Error);
        assert_eq!(decision.confidence, 0.0);
        assert!(decision.signals.is_none());
        assert_eq!(decision.error.as_deref(), Some(NO_DATA_ERROR));
    }

    #[tokio::test]
    async fn test_signals_are_echoed_and_timestamp_stamped() {
        let fetcher = StubFetcher::default().with(
            "/v1/signals/{ticker}",
            json!({"regime": "risk_on", "event_risk": "low"}),
        );
        let uc = use_case(fetcher);

        let decision = uc.execute(&Ticker::new("qqq")).await;
        assert_eq!(decision.action, Action::Long);
        assert_eq!(decision.confidence, 0.4);
        assert!(decision.error.is_none());
        assert_eq!(
            decision.signals.unwrap().get("regime"),
            Some(&json!("risk_on"))
        );
        assert_eq!(
            decision.timestamp,
            Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_feeds_are_fetched_concurrently() {
        let fetcher = StubFetcher::default().with_delay(Duration::from_millis(100));
        let uc = use_case(fetcher);

        let started = tokio::time::Instant::now();
        uc.fetch_bundle(&Ticker::new("spy")).await;

        assert!(started.elapsed() < Duration::from_millis(200));
        assert_eq!(uc.fetcher.calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_default_endpoints() {
        let endpoints = SignalEndpoints::default();
        let names: Vec<_> = endpoints.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["signals", "fair_value", "spread"]);
        assert!(endpoints.iter().all(|(_, t)| t.has_placeholder()));
    }
}
