//! Logging event log and system clock

use chrono::{DateTime, Utc};

use crate::core::models::VerificationEvent;
use crate::core::ports::{Clock, EventLog};

/// Event log forwarding to the `log` facade under the `verification` target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventLog;

impl EventLog for LogEventLog {
    fn record(&self, event: &VerificationEvent) {
        match event {
            VerificationEvent::Started { user_id, channels } => {
                log::info!(target: "verification", "{user_id}: started, channels {channels:?}");
            },
            VerificationEvent::Rejected {
                user_id,
                code,
                reason,
            } => {
                log::warn!(target: "verification", "{user_id}: rejected [{code}] {reason}");
            },
            VerificationEvent::ChannelChecked {
                user_id,
                channel,
                verified,
            } => {
                log::debug!(
                    target: "verification",
                    "{user_id}: {channel} checked, verified={verified}"
                );
            },
            VerificationEvent::ChannelFailed {
                user_id,
                channel,
                failure,
            } => {
                log::warn!(target: "verification", "{user_id}: {channel} {failure}");
            },
            VerificationEvent::ConflictRetry { user_id, attempt } => {
                log::debug!(target: "verification", "{user_id}: write conflict, retry {attempt}");
            },
            VerificationEvent::Persisted {
                user_id,
                version,
                score,
                status,
            } => {
                log::info!(
                    target: "verification",
                    "{user_id}: persisted v{version}, score {score:.1}, status {status}"
                );
            },
        }
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
