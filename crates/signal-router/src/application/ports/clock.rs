use crate::domain::Timestamp;

/// Time source used to stamp routing decisions
pub trait Clock: Send + Sync {
    /// Current UTC time
    fn now(&self) -> Timestamp;
}
