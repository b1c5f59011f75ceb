//! JSON-file stores
//!
//! Durable record and profile stores backed by one JSON file per user.
//!
//! ```text
//! <data_dir>/
//! ├── records/<hex(user_id)>.json
//! └── profiles/<hex(user_id)>.json
//! ```
//!
//! File names are hex-encoded so any user id maps to a safe path. Record
//! writes take an exclusive `.lock` file, check the stored version, write a
//! temp file and rename it into place, so concurrent processes sharing the
//! directory never observe a half-written record.

mod files;
mod profile_store;
mod record_store;

pub use profile_store::JsonProfileStore;
pub use record_store::JsonRecordStore;

/// Subdirectory for verification records
pub const RECORDS_DIR: &str = "records";
/// Subdirectory for profiles
pub const PROFILES_DIR: &str = "profiles";
