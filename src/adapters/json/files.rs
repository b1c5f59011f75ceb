//! File helpers shared by the JSON stores

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

use crate::core::ports::StoreError;

const LOCK_ATTEMPTS: u32 = 200;
const LOCK_BACKOFF: Duration = Duration::from_millis(10);
/// Locks older than this are assumed abandoned by a crashed writer
const STALE_LOCK_AGE: Duration = Duration::from_secs(30);

pub fn backend(err: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Path of the JSON file for a user under `dir`
pub fn entry_path(dir: &Path, user_id: &str) -> PathBuf {
    dir.join(format!("{}.json", hex::encode(user_id.as_bytes())))
}

/// Read and parse a JSON file; `None` if it does not exist
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| backend(format!("corrupt file {}: {e}", path.display()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(backend(e)),
    }
}

/// Write JSON via temp file + rename
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(backend)?;
    }
    let content = serde_json::to_string_pretty(value).map_err(backend)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).await.map_err(backend)?;
    fs::rename(&tmp, path).await.map_err(backend)
}

/// Exclusive lock on one entry, released on drop
#[derive(Debug)]
pub struct EntryLock {
    path: PathBuf,
}

impl EntryLock {
    /// Acquire the lock for `entry`, waiting briefly for other writers
    pub async fn acquire(entry: &Path) -> Result<Self, StoreError> {
        let path = entry.with_extension("lock");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(backend)?;
        }

        for _ in 0..LOCK_ATTEMPTS {
            match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if is_stale(&path).await {
                        log::warn!("removing stale lock {}", path.display());
                        let _ = fs::remove_file(&path).await;
                        continue;
                    }
                    tokio::time::sleep(LOCK_BACKOFF).await;
                },
                Err(e) => return Err(backend(e)),
            }
        }
        Err(backend(format!("timed out waiting for lock {}", path.display())))
    }
}

impl Drop for EntryLock {
    fn drop(&mut self) {
        // Drop cannot await; removal is a single quick syscall.
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn is_stale(path: &Path) -> bool {
    let Ok(meta) = fs::metadata(path).await else {
        return false;
    };
    meta.modified()
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age > STALE_LOCK_AGE)
}
