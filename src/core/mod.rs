//! Core domain logic for mentor verification
//!
//! This module contains the verification engine. Everything it needs from
//! the outside world (stores, upstream verifiers, logging, time) is reached
//! through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (record, status, request, profile)
//! - `services/` - Eligibility, scoring, status resolution and orchestration
//! - `ports/` - Trait definitions for external dependencies
//! - `error` - Error taxonomy surfaced to callers

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::VerificationError;
