use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the router understands. Anything else in a payload is carried along untouched.
pub mod keys {
    pub const STATUS: &str = "status";

    // Free signals feed
    pub const REGIME: &str = "regime";
    pub const EVENT_RISK: &str = "event_risk";
    pub const EVENT_IMPACT: &str = "event_impact";

    // Fair-value feed
    pub const FAIR_VALUE: &str = "fair_value";
    pub const CONFIDENCE: &str = "confidence";
    pub const SOURCE: &str = "source";

    // Spread feed
    pub const ARBITRAGE_FLAG: &str = "arbitrage_flag";
    pub const CHEAPEST_VENUE: &str = "cheapest_venue";
    pub const RICHEST_VENUE: &str = "richest_venue";
    pub const MAX_SPREAD_BPS: &str = "max_spread_bps";
}

/// Value of `status` the provider uses to say "no data for this ticker"
pub const NO_DATA_STATUS: &str = "no_data";

/// Label reported when a text field is missing
pub const UNKNOWN_LABEL: &str = "unknown";

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One provider payload for a ticker
///
/// Providers define their own fields, so this is a JSON object with typed
/// accessors for the keys in [`keys`] rather than a fixed schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalDataset(Map<String, Value>);

impl SignalDataset {
    pub fn new(fields: Map<String, Value>) -> Self {
        SignalDataset(fields)
    }

    /// Wrap a JSON value; only objects are datasets
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(SignalDataset(fields)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// True for the `{"status": "no_data"}` sentinel
    pub fn is_no_data(&self) -> bool {
        self.0.get(keys::STATUS).and_then(Value::as_str) == Some(NO_DATA_STATUS)
    }

    /// Whether `key` holds a truthy value
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(is_truthy)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Field rendered as text: strings verbatim, other values as JSON
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Like [`SignalDataset::text`] but falls back to `"unknown"`
    pub fn label(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }
}

impl From<Map<String, Value>> for SignalDataset {
    fn from(fields: Map<String, Value>) -> Self {
        SignalDataset(fields)
    }
}
