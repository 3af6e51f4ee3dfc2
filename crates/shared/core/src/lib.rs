//! Signal Router Core Domain
//!
//! Pure domain types shared by the signal router.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod dataset;
pub mod decision;
pub mod values;

// Re-export commonly used types at crate root
pub use dataset::{NO_DATA_STATUS, SignalDataset, UNKNOWN_LABEL, is_truthy, keys};
pub use decision::{Action, Decision, NO_DATA_ERROR, RoutingDecision};
pub use values::{Ticker, Timestamp, iso_utc};
