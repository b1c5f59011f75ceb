//! Verification orchestrator
//!
//! Coordinates eligibility, verifier calls and the record write for one user.
//!
//! ## Guarantees
//!
//! - **Single-flight per user**: read-merge-write runs under a per-user async
//!   lock; across processes the store's versioned `update` rejects stale
//!   writers and the merge is re-applied to the fresh record.
//! - **Partial failure isolation**: a failing verifier is recorded on its own
//!   channel; the call still succeeds with a degraded merge.
//! - **No half writes**: the merged record is built in memory and written with
//!   a single store call, so a cancelled call writes nothing.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard};

use super::eligibility::check_eligibility;
use super::merge::{self, ChannelOutcomes, SourceOutcome};
use super::resolver::{StatusPolicy, evaluate};
use super::scorer::TrustWeights;
use crate::core::error::{Result, VerificationError};
use crate::core::models::{
    Channel, ChannelFailure, DocumentPayload, Eligibility, REASON_ALREADY_VERIFIED,
    StatusReport, VerificationEvent, VerificationRecord, VerificationRequest,
};
use crate::core::ports::{
    Clock, DocumentCheck, DocumentVerifier, EventLog, ProfileStore, RecordStore, SourceCheck,
    SourceVerifier,
};

/// Tunables for the orchestrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorSettings {
    /// Channel weights
    pub weights: TrustWeights,
    /// Status thresholds
    pub policy: StatusPolicy,
    /// Reload-and-reapply attempts after a lost write race
    pub max_conflict_retries: u32,
    /// Upper bound on a single verifier call
    pub verifier_timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            weights: TrustWeights::default(),
            policy: StatusPolicy::default(),
            max_conflict_retries: 3,
            verifier_timeout: Duration::from_secs(10),
        }
    }
}

/// External collaborators, injected at construction
#[derive(Clone)]
pub struct Collaborators {
    /// Verification record store
    pub records: Arc<dyn RecordStore>,
    /// Profile store
    pub profiles: Arc<dyn ProfileStore>,
    /// Source-hosting verifier
    pub source: Arc<dyn SourceVerifier>,
    /// Document verifier
    pub documents: Arc<dyn DocumentVerifier>,
    /// Event sink
    pub events: Arc<dyn EventLog>,
    /// Time source
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Drives verification runs and answers status/eligibility queries
pub struct Orchestrator {
    deps: Collaborators,
    settings: OrchestratorSettings,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("settings", &self.settings)
            .field("locked_users", &self.locks.len())
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator
    #[must_use]
    pub fn new(deps: Collaborators, settings: OrchestratorSettings) -> Self {
        Self {
            deps,
            settings,
            locks: DashMap::new(),
        }
    }

    /// Active settings
    #[must_use]
    pub const fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Initiate or advance verification for a user
    ///
    /// Returns the persisted record. Channel failures are recorded on the
    /// record; only structural failures are returned as errors.
    pub async fn verify(
        &self,
        user_id: &str,
        request: VerificationRequest,
    ) -> Result<VerificationRecord> {
        let user_id = authenticated(user_id)?;

        let slot = UserLock::acquire(&self.locks, user_id);
        let result = {
            let _guard = slot.lock().await;
            self.verify_locked(user_id, &request).await
        };
        drop(slot);

        result.map_err(|err| self.reject(user_id, err))
    }

    /// Users with a verification run in flight or waiting for one
    #[must_use]
    pub fn active_locks(&self) -> usize {
        self.locks.len()
    }

    /// Recompute score and status from the stored record
    ///
    /// Never calls a verifier. A stored `verified` status is reported as-is.
    pub async fn status(&self, user_id: &str) -> Result<StatusReport> {
        let user_id = authenticated(user_id)?;
        let record = self
            .deps
            .records
            .get(user_id)
            .await?
            .ok_or_else(|| VerificationError::RecordNotFound(user_id.to_string()))?;

        let (score, resolved) = evaluate(&record, &self.settings.weights, &self.settings.policy);
        let status = if record.is_verified() { record.status } else { resolved };

        Ok(StatusReport {
            user_id: record.user_id.clone(),
            source_verified: record.source_verified,
            documents_verified: record.documents_channel_verified(),
            identity_verified: record.identity_verified,
            status,
            score,
        })
    }

    /// Whether a user may enter verification
    pub async fn eligibility(&self, user_id: &str) -> Result<Eligibility> {
        let user_id = authenticated(user_id)?;
        let profile = self.deps.profiles.get(user_id).await?;
        let record = self.deps.records.get(user_id).await?;
        Ok(check_eligibility(profile.as_ref(), record.as_ref()))
    }

    async fn verify_locked(
        &self,
        user_id: &str,
        request: &VerificationRequest,
    ) -> Result<VerificationRecord> {
        // Re-checked here: eligibility may have changed since the caller looked.
        let existing = self.eligible_record(user_id).await?;
        request.validate().map_err(VerificationError::InvalidInput)?;

        if existing.is_none() && request.source_handle.is_none() {
            return Err(VerificationError::InvalidInput(
                "A source handle is required to start verification".to_string(),
            ));
        }

        self.deps.events.record(&VerificationEvent::Started {
            user_id: user_id.to_string(),
            channels: request.channels(),
        });

        let outcomes = self.run_channels(user_id, request).await;
        self.persist(user_id, existing, &outcomes).await
    }

    /// Load the current record once the user is confirmed eligible
    async fn eligible_record(&self, user_id: &str) -> Result<Option<VerificationRecord>> {
        let profile = self.deps.profiles.get(user_id).await?;
        let existing = self.deps.records.get(user_id).await?;
        let eligibility = check_eligibility(profile.as_ref(), existing.as_ref());
        if eligibility.eligible {
            return Ok(existing);
        }
        let reason = eligibility.reason.unwrap_or_default();
        if reason == REASON_ALREADY_VERIFIED {
            return Err(VerificationError::AlreadyVerified(user_id.to_string()));
        }
        Err(VerificationError::NotEligible(reason))
    }

    /// Run every supplied channel; source and documents run concurrently
    async fn run_channels(&self, user_id: &str, request: &VerificationRequest) -> ChannelOutcomes {
        let source = async {
            match request.source_handle.as_deref() {
                Some(handle) => Some(SourceOutcome {
                    handle: handle.trim().to_string(),
                    result: self.check_source(user_id, handle.trim()).await,
                }),
                None => None,
            }
        };
        let documents = async {
            match request.documents.as_deref() {
                Some(documents) => Some(self.check_documents(user_id, documents).await),
                None => None,
            }
        };
        let (source, documents) = tokio::join!(source, documents);

        if let Some(identity) = &request.identity {
            self.deps.events.record(&VerificationEvent::ChannelChecked {
                user_id: user_id.to_string(),
                channel: Channel::Identity,
                verified: identity.verified,
            });
        }

        ChannelOutcomes {
            source,
            documents,
            identity: request.identity.clone(),
        }
    }

    async fn check_source(
        &self,
        user_id: &str,
        handle: &str,
    ) -> std::result::Result<SourceCheck, ChannelFailure> {
        let call = self.deps.source.verify_profile(handle);
        let result = match tokio::time::timeout(self.settings.verifier_timeout, call).await {
            Ok(Ok(check)) => Ok(check),
            Ok(Err(err)) => Err(ChannelFailure::from(&err)),
            Err(_) => Err(self.timed_out()),
        };
        self.record_channel(user_id, Channel::Source, result.as_ref().map(|c| c.verified));
        result
    }

    async fn check_documents(
        &self,
        user_id: &str,
        documents: &[DocumentPayload],
    ) -> std::result::Result<DocumentCheck, ChannelFailure> {
        let call = self.deps.documents.validate_documents(documents);
        let result = match tokio::time::timeout(self.settings.verifier_timeout, call).await {
            Ok(Ok(check)) => Ok(check),
            Ok(Err(err)) => Err(ChannelFailure::from(&err)),
            Err(_) => Err(self.timed_out()),
        };
        self.record_channel(user_id, Channel::Documents, result.as_ref().map(|c| c.verified));
        result
    }

    fn record_channel(
        &self,
        user_id: &str,
        channel: Channel,
        outcome: std::result::Result<bool, &ChannelFailure>,
    ) {
        let event = match outcome {
            Ok(verified) => VerificationEvent::ChannelChecked {
                user_id: user_id.to_string(),
                channel,
                verified,
            },
            Err(failure) => {
                log::warn!("{channel} check for {user_id} failed: {failure}");
                VerificationEvent::ChannelFailed {
                    user_id: user_id.to_string(),
                    channel,
                    failure: failure.clone(),
                }
            },
        };
        self.deps.events.record(&event);
    }

    fn timed_out(&self) -> ChannelFailure {
        ChannelFailure::unavailable(format!(
            "verifier timed out after {}ms",
            self.settings.verifier_timeout.as_millis()
        ))
    }

    /// Merge outcomes and write, re-applying on lost races
    async fn persist(
        &self,
        user_id: &str,
        mut current: Option<VerificationRecord>,
        outcomes: &ChannelOutcomes,
    ) -> Result<VerificationRecord> {
        let mut attempt = 0;
        loop {
            let record = self.merged(user_id, current.as_ref(), outcomes)?;
            let write = match &current {
                None => self.deps.records.create(&record).await,
                Some(previous) => self.deps.records.update(&record, previous.version).await,
            };

            match write {
                Ok(()) => {
                    self.deps.events.record(&VerificationEvent::Persisted {
                        user_id: user_id.to_string(),
                        version: record.version,
                        score: record.score,
                        status: record.status,
                    });
                    return Ok(record);
                },
                Err(err) if err.is_conflict() && attempt < self.settings.max_conflict_retries => {
                    attempt += 1;
                    log::debug!("write conflict for {user_id} ({err}); retry {attempt}");
                    self.deps.events.record(&VerificationEvent::ConflictRetry {
                        user_id: user_id.to_string(),
                        attempt,
                    });
                    // The profile may have changed along with the record
                    current = self.eligible_record(user_id).await?;
                },
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Build the next version of the record from `current` and `outcomes`
    fn merged(
        &self,
        user_id: &str,
        current: Option<&VerificationRecord>,
        outcomes: &ChannelOutcomes,
    ) -> Result<VerificationRecord> {
        let now = self.deps.clock.now();
        let mut record = match current {
            Some(existing) if existing.is_verified() => {
                return Err(VerificationError::AlreadyVerified(user_id.to_string()));
            },
            Some(existing) => existing.clone(),
            None if outcomes.source.is_none() => {
                return Err(VerificationError::InvalidInput(
                    "A source handle is required to start verification".to_string(),
                ));
            },
            None => VerificationRecord::new(user_id, now),
        };

        merge::apply(&mut record, outcomes);

        let (score, status) = evaluate(&record, &self.settings.weights, &self.settings.policy);
        record.score = score;
        record.status = status;
        record.version += 1;
        record.updated_at = now;
        Ok(record)
    }

    fn reject(&self, user_id: &str, err: VerificationError) -> VerificationError {
        self.deps.events.record(&VerificationEvent::Rejected {
            user_id: user_id.to_string(),
            code: err.code(),
            reason: err.to_string(),
        });
        err
    }
}

/// Handle on one user's lock; drops the map entry when the last holder leaves,
/// including when the owning future is cancelled
struct UserLock<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    user_id: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> UserLock<'a> {
    fn acquire(locks: &'a DashMap<String, Arc<Mutex<()>>>, user_id: &'a str) -> Self {
        let lock = locks.entry(user_id.to_string()).or_default().clone();
        Self {
            locks,
            user_id,
            lock,
        }
    }

    async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

impl Drop for UserLock<'_> {
    fn drop(&mut self) {
        // Owned by the map and this handle only
        self.locks.remove_if(self.user_id, |_, l| {
            Arc::ptr_eq(l, &self.lock) && Arc::strong_count(l) == 2
        });
    }
}

fn authenticated(user_id: &str) -> Result<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(VerificationError::NotAuthenticated);
    }
    Ok(user_id)
}
