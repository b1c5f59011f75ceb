//! JSON-file profile store
//!
//! Profiles are owned elsewhere in the product; this store exists so the
//! CLI and server can run standalone.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::files::{entry_path, read_json, write_json};
use super::{PROFILES_DIR, RECORDS_DIR};
use crate::core::models::Profile;
use crate::core::ports::{ProfileStore, StoreError};

/// Profile store keeping one JSON file per user
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    dir: PathBuf,
    records_dir: PathBuf,
}

impl JsonProfileStore {
    /// Store rooted at `<data_dir>/profiles`
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join(PROFILES_DIR),
            records_dir: data_dir.join(RECORDS_DIR),
        }
    }

    /// Insert or replace a profile
    pub async fn upsert(&self, profile: &Profile) -> Result<(), StoreError> {
        write_json(&entry_path(&self.dir, &profile.user_id), profile).await
    }
}

#[async_trait]
impl ProfileStore for JsonProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let profile: Option<Profile> = read_json(&entry_path(&self.dir, user_id)).await?;
        Ok(profile.map(|mut p| {
            p.has_verification_record = entry_path(&self.records_dir, user_id).exists();
            p
        }))
    }
}
