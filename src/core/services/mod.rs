//! Business logic services
//!
//! - [`eligibility`] - Who may enter verification (pure)
//! - [`scorer`] - Per-channel signals to one trust score (pure)
//! - [`resolver`] - Score plus hard gates to a status (pure)
//! - [`merge`] - Replace-on-supply merge of channel outcomes (pure)
//! - [`orchestrator`] - Drives a verification run against the ports

pub mod eligibility;
pub mod merge;
pub mod orchestrator;
pub mod resolver;
pub mod scorer;

pub use eligibility::check_eligibility;
pub use merge::{ChannelOutcomes, SourceOutcome};
pub use orchestrator::{Collaborators, Orchestrator, OrchestratorSettings};
pub use resolver::{StatusPolicy, evaluate, hard_gate_met, resolve_status};
pub use scorer::{TrustWeights, WeightsError, score};
