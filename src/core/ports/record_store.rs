//! Verification record store port
//!
//! Defines the read/write contract for durable per-user records.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::models::VerificationRecord;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `create` found an existing record for the user
    #[error("record already exists for user {0}")]
    AlreadyExists(String),

    /// `update` found a different version than expected
    #[error("version conflict for user {user}: expected {expected}, found {actual}")]
    VersionConflict {
        /// User whose record conflicted
        user: String,
        /// Version the writer read
        expected: u64,
        /// Version currently stored
        actual: u64,
    },

    /// `update` found no record
    #[error("record not found for user {0}")]
    NotFound(String),

    /// Backend failure (I/O, serialization, ...)
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Whether the error signals a lost optimistic-concurrency race
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists(_) | Self::VersionConflict { .. })
    }
}

/// Durable store of verification records, unique on user id
///
/// Writes are optimistic: `update` only succeeds when the stored version
/// equals `expected_version`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the record for a user
    async fn get(&self, user_id: &str) -> Result<Option<VerificationRecord>, StoreError>;

    /// Insert a new record; fails with `AlreadyExists` if one is present
    async fn create(&self, record: &VerificationRecord) -> Result<(), StoreError>;

    /// Replace a record whose stored version equals `expected_version`
    async fn update(
        &self,
        record: &VerificationRecord,
        expected_version: u64,
    ) -> Result<(), StoreError>;
}
