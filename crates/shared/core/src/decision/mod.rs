use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dataset::SignalDataset;
use crate::values::{Ticker, Timestamp, serialize_iso_utc};

/// Message attached to a routing decision when the free signals feed was unavailable
pub const NO_DATA_ERROR: &str =
    "No data available (may require x402 payment or ticker not supported)";

/// Suggested routing action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Long,
    Short,
    Neutral,
    Error,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Long => "long",
            Action::Short => "short",
            Action::Neutral => "neutral",
            Action::Error => "error",
        };
        f.write_str(s)
    }
}

/// Output of the decision rules
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Action,
    /// Always within [0, 1]
    pub confidence: f64,
    pub reasoning: String,
}

impl Decision {
    /// Build a decision, clamping `confidence` into [0, 1] (NaN becomes 0)
    pub fn new(action: Action, confidence: f64, reasoning: impl Into<String>) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Decision {
            action,
            confidence,
            reasoning: reasoning.into(),
        }
    }
}

/// Response record for one routed ticker
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    pub ticker: String,
    pub action: Action,
    pub confidence: f64,
    pub reasoning: String,
    /// Echo of the free signals feed
    pub signals: Option<SignalDataset>,
    pub error: Option<String>,
    #[serde(serialize_with = "serialize_iso_utc")]
    pub timestamp: Timestamp,
}

impl RoutingDecision {
    /// Compose the response. An empty or missing signals feed sets `error`.
    pub fn new(
        ticker: &Ticker,
        decision: Decision,
        signals: Option<SignalDataset>,
        timestamp: Timestamp,
    ) -> Self {
        let signals = signals.filter(|s| !s.is_empty());
        let error = match signals {
            Some(_) => None,
            None => Some(NO_DATA_ERROR.to_string()),
        };

        RoutingDecision {
            ticker: ticker.symbol(),
            action: decision.action,
            confidence: decision.confidence,
            reasoning: decision.reasoning,
            signals,
            error,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Decision::new(Action::Long, 1.7, "").confidence, 1.0);
        assert_eq!(Decision::new(Action::Long, -0.2, "").confidence, 0.0);
        assert_eq!(Decision::new(Action::Long, f64::NAN, "").confidence, 0.0);
        assert_eq!(Decision::new(Action::Long, 0.42, "").confidence, 0.42);
    }

    #[test]
    fn test_action_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Action::Neutral).unwrap(), json!("neutral"));
        assert_eq!(Action::Error.to_string(), "error");
    }

    #[test]
    fn test_routing_decision_shape() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let ticker = Ticker::new("spy");
        let signals = SignalDataset::from_value(json!({"regime": "risk_on"}));
        let record = RoutingDecision::new(
            &ticker,
            Decision::new(Action::Long, 0.4, "Risk-on regime with no specific signal"),
            signals,
            ts,
        );

        let body = serde_json::to_value(&record).unwrap();
        assert_eq!(
            body,
            json!({
                "ticker": "SPY",
                "action": "long",
                "confidence": 0.4,
                "reasoning": "Risk-on regime with no specific signal",
                "signals": {"regime": "risk_on"},
                "error": null,
                "timestamp": "2026-01-02T03:04:05.000000Z",
            })
        );
    }

    #[test]
    fn test_missing_signals_sets_error() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let ticker = Ticker::new("qqq");
        let record = RoutingDecision::new(
            &ticker,
            Decision::new(Action::Error, 0.0, "no data"),
            Some(SignalDataset::default()),
            ts,
        );

        assert!(record.signals.is_none());
        assert_eq!(record.error.as_deref(), Some(NO_DATA_ERROR));
    }
}
