//! Profile store port
//!
//! Read-only access to the product's profiles.

use async_trait::async_trait;

use super::StoreError;
use crate::core::models::Profile;

/// Source of profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the profile for a user
    async fn get(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;
}
