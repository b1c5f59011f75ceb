//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `memory` - In-memory record and profile stores
//! - `json/` - JSON-file record and profile stores
//! - `github` - GitHub REST API source verifier (feature `github`)
//! - `offline` - Source verifier for runs without network access
//! - `documents` - Rule-based document verifier
//! - `logging` - `log`-facade event log and system clock

pub mod documents;
#[cfg(feature = "github")]
pub mod github;
pub mod json;
pub mod logging;
pub mod memory;
pub mod offline;

pub use documents::BasicDocumentVerifier;
#[cfg(feature = "github")]
pub use github::GithubVerifier;
pub use json::{JsonProfileStore, JsonRecordStore};
pub use logging::{LogEventLog, SystemClock};
pub use memory::{InMemoryProfileStore, InMemoryRecordStore};
pub use offline::OfflineSourceVerifier;
