//! Routing rules
//!
//! Maps the three provider feeds for a ticker onto a single [`Decision`].
//! Rules are evaluated in priority order and the first match wins:
//!
//! 1. no free signals → `error`
//! 2. elevated risk in the free signals → `neutral`
//! 3. arbitrage flagged in the spread feed → `long`
//! 4. fair value available → `long` or `neutral` depending on its confidence
//! 5. risk-on regime → mild `long`
//! 6. otherwise → `neutral`

use router_core::{Action, Decision, SignalDataset, keys};

pub const NO_SIGNALS_REASONING: &str =
    "No signal data available (may require x402 payment or ticker not supported)";

const ELEVATED_RISK_LABELS: [&str; 2] = ["elevated", "high"];
const HIGH_VOLATILITY_REGIMES: [&str; 3] = ["hvol", "high_vol", "high_volatility"];
const RISK_OFF_REGIME: &str = "risk_off";
const RISK_ON_REGIME: &str = "risk_on";

const HIGH_RISK_CONFIDENCE: f64 = 0.5;
const ARBITRAGE_CONFIDENCE: f64 = 0.7;
const DEFAULT_FAIR_VALUE_CONFIDENCE: f64 = 0.5;
/// Fair-value confidence at or above this routes long
const FAIR_VALUE_LONG_THRESHOLD: f64 = 0.5;
const RISK_ON_CONFIDENCE: f64 = 0.4;
const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Apply the routing rules to whatever feeds were available
///
/// An empty signals payload counts as missing.
pub fn decide(
    signals: Option<&SignalDataset>,
    fair_value: Option<&SignalDataset>,
    spread: Option<&SignalDataset>,
) -> Decision {
    let Some(signals) = signals.filter(|s| !s.is_empty()) else {
        return Decision::new(Action::Error, 0.0, NO_SIGNALS_REASONING);
    };

    let regime = signals.label(keys::REGIME);
    let event_risk = signals.label(keys::EVENT_RISK);

    if is_elevated_risk(signals) {
        return Decision::new(
            Action::Neutral,
            HIGH_RISK_CONFIDENCE,
            format!(
                "High risk environment (regime: {}, event_risk: {})",
                regime, event_risk
            ),
        );
    }

    if let Some(spread) = spread.filter(|s| s.flag(keys::ARBITRAGE_FLAG)) {
        let cheapest = spread.label(keys::CHEAPEST_VENUE);
        let richest = spread.label(keys::RICHEST_VENUE);
        let max_spread = spread
            .text(keys::MAX_SPREAD_BPS)
            .unwrap_or_else(|| "0".to_string());

        return Decision::new(
            Action::Long,
            ARBITRAGE_CONFIDENCE,
            format!(
                "Arbitrage opportunity: {} -> {}, spread {}bps",
                cheapest, richest, max_spread
            ),
        );
    }

    if let Some(fair_value) = fair_value.filter(|fv| fv.flag(keys::FAIR_VALUE)) {
        let score = fair_value
            .number(keys::CONFIDENCE)
            .unwrap_or(DEFAULT_FAIR_VALUE_CONFIDENCE)
            .clamp(0.0, 1.0);
        let source = fair_value.label(keys::SOURCE);
        let action = if score < FAIR_VALUE_LONG_THRESHOLD {
            Action::Neutral
        } else {
            Action::Long
        };

        return Decision::new(
            action,
            score,
            format!(
                "Fair value anchored (source: {}, confidence: {:.2})",
                source, score
            ),
        );
    }

    if regime == RISK_ON_REGIME {
        return Decision::new(
            Action::Long,
            RISK_ON_CONFIDENCE,
            "Risk-on regime with no specific signal",
        );
    }

    Decision::new(
        Action::Neutral,
        FALLBACK_CONFIDENCE,
        "No clear signal - market in equilibrium",
    )
}

/// Risk-off or high-volatility regime, or elevated event risk/impact
pub fn is_elevated_risk(signals: &SignalDataset) -> bool {
    label_in(signals, keys::EVENT_RISK, &ELEVATED_RISK_LABELS)
        || label_in(signals, keys::EVENT_IMPACT, &ELEVATED_RISK_LABELS)
        || label_in(signals, keys::REGIME, &[RISK_OFF_REGIME])
        || label_in(signals, keys::REGIME, &HIGH_VOLATILITY_REGIMES)
}

fn label_in(signals: &SignalDataset, key: &str, labels: &[&str]) -> bool {
    signals
        .text(key)
        .is_some_and(|v| labels.iter().any(|l| v.eq_ignore_ascii_case(l)))
}
