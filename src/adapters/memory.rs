//! In-memory store implementations
//!
//! Suitable for tests and single-process deployments. Records live in a
//! `DashMap` and writes use the same version check as durable stores.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::core::models::{Profile, VerificationRecord};
use crate::core::ports::{ProfileStore, RecordStore, StoreError};

/// In-memory verification record store
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: DashMap<String, VerificationRecord>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record exists for the user
    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        self.records.contains_key(user_id)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, user_id: &str) -> Result<Option<VerificationRecord>, StoreError> {
        Ok(self.records.get(user_id).map(|r| r.value().clone()))
    }

    async fn create(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        match self.records.entry(record.user_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(record.user_id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            },
        }
    }

    async fn update(
        &self,
        record: &VerificationRecord,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        let mut stored = self
            .records
            .get_mut(&record.user_id)
            .ok_or_else(|| StoreError::NotFound(record.user_id.clone()))?;
        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                user: record.user_id.clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }
        *stored = record.clone();
        Ok(())
    }
}

/// In-memory profile store
///
/// When linked to a record store, `has_verification_record` reflects whether
/// that store holds a record for the user.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: DashMap<String, Profile>,
    records: Option<Arc<InMemoryRecordStore>>,
}

impl InMemoryProfileStore {
    /// Create an empty, unlinked store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that derives the record back-reference from `records`
    #[must_use]
    pub fn linked(records: Arc<InMemoryRecordStore>) -> Self {
        Self {
            profiles: DashMap::new(),
            records: Some(records),
        }
    }

    /// Insert or replace a profile
    pub fn upsert(&self, profile: Profile) {
        self.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Builder-style insert
    #[must_use]
    pub fn with_profile(self, profile: Profile) -> Self {
        self.upsert(profile);
        self
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let Some(mut profile) = self.profiles.get(user_id).map(|p| p.value().clone()) else {
            return Ok(None);
        };
        if let Some(records) = &self.records {
            profile.has_verification_record = records.contains(user_id);
        }
        Ok(Some(profile))
    }
}
