pub mod decision_engine;

pub use decision_engine::{NO_SIGNALS_REASONING, decide, is_elevated_risk};

// Shared kernel types used throughout this crate
pub use router_core::{
    Action, Decision, NO_DATA_ERROR, RoutingDecision, SignalDataset, Ticker, Timestamp, keys,
};
