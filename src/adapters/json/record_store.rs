//! JSON-file verification record store

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::RECORDS_DIR;
use super::files::{EntryLock, entry_path, read_json, write_json};
use crate::core::models::VerificationRecord;
use crate::core::ports::{RecordStore, StoreError};

/// Record store keeping one JSON file per user
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    dir: PathBuf,
}

impl JsonRecordStore {
    /// Store rooted at `<data_dir>/records`
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join(RECORDS_DIR),
        }
    }

    /// Whether a record file exists for the user
    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        entry_path(&self.dir, user_id).exists()
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn get(&self, user_id: &str) -> Result<Option<VerificationRecord>, StoreError> {
        read_json(&entry_path(&self.dir, user_id)).await
    }

    async fn create(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        let path = entry_path(&self.dir, &record.user_id);
        let _lock = EntryLock::acquire(&path).await?;
        if read_json::<VerificationRecord>(&path).await?.is_some() {
            return Err(StoreError::AlreadyExists(record.user_id.clone()));
        }
        write_json(&path, record).await
    }

    async fn update(
        &self,
        record: &VerificationRecord,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        let path = entry_path(&self.dir, &record.user_id);
        let _lock = EntryLock::acquire(&path).await?;
        let stored: VerificationRecord = read_json(&path)
            .await?
            .ok_or_else(|| StoreError::NotFound(record.user_id.clone()))?;
        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                user: record.user_id.clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }
        write_json(&path, record).await
    }
}
