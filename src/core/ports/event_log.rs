//! Event log and clock ports
//!
//! Both are injected into the orchestrator at construction.

use chrono::{DateTime, Utc};

use crate::core::models::VerificationEvent;

/// Sink for verification events
pub trait EventLog: Send + Sync {
    /// Record one event
    fn record(&self, event: &VerificationEvent);
}

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}
