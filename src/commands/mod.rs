//! Command implementations

mod config;
mod eligibility;
mod profile;
#[cfg(feature = "server")]
mod serve;
mod status;
mod verify;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
#[cfg(feature = "github")]
use std::time::Duration;

use mentor_verify::adapters::{
    BasicDocumentVerifier, JsonProfileStore, JsonRecordStore, LogEventLog, OfflineSourceVerifier,
    SystemClock,
};
use mentor_verify::config::AppConfig;
use mentor_verify::core::VerificationError;
use mentor_verify::core::ports::SourceVerifier;
use mentor_verify::core::services::{Collaborators, Orchestrator};
use mentor_verify::output::OutputMode;

pub use config::{config_init, config_show};
pub use eligibility::eligibility;
pub use profile::{profile_set, profile_show};
#[cfg(feature = "server")]
pub use serve::serve;
pub use status::status;
pub use verify::{VerifyInput, verify};

/// Everything a command needs from the command line and config
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration
    pub config: AppConfig,
    /// Skip the source-hosting service
    pub offline: bool,
    /// Output mode
    pub mode: OutputMode,
}

impl Context {
    /// Effective data directory
    pub fn data_dir(&self) -> PathBuf {
        self.config.data_dir()
    }

    /// Profile store for the data directory
    pub fn profiles(&self) -> JsonProfileStore {
        JsonProfileStore::new(&self.data_dir())
    }

    /// Orchestrator wired to the file stores and configured verifiers
    pub fn orchestrator(&self) -> anyhow::Result<Orchestrator> {
        let settings = self.config.settings()?;
        let data_dir = self.data_dir();
        let documents = &self.config.documents;
        let deps = Collaborators {
            records: Arc::new(JsonRecordStore::new(&data_dir)),
            profiles: Arc::new(JsonProfileStore::new(&data_dir)),
            source: self.source_verifier()?,
            documents: Arc::new(BasicDocumentVerifier::new(
                documents.max_bytes,
                documents.allowed_types.clone(),
            )),
            events: Arc::new(LogEventLog),
            clock: Arc::new(SystemClock),
        };
        Ok(Orchestrator::new(deps, settings))
    }

    #[cfg(feature = "github")]
    fn source_verifier(&self) -> anyhow::Result<Arc<dyn SourceVerifier>> {
        if self.offline {
            return Ok(Arc::new(OfflineSourceVerifier));
        }
        let github = &self.config.github;
        let timeout = Duration::from_secs(self.config.orchestrator.verifier_timeout_secs);
        Ok(Arc::new(mentor_verify::adapters::GithubVerifier::new(
            &github.api_base,
            github.token.clone(),
            &github.user_agent,
            timeout,
        )?))
    }

    #[cfg(not(feature = "github"))]
    fn source_verifier(&self) -> anyhow::Result<Arc<dyn SourceVerifier>> {
        if !self.offline {
            log::warn!("built without the github feature; source checks run offline");
        }
        Ok(Arc::new(OfflineSourceVerifier))
    }
}

/// Drive an async command to completion on a fresh runtime
pub fn block_on<F>(future: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    tokio::runtime::Runtime::new()?.block_on(future)
}

/// Attach the stable error code to a domain error
fn domain_error(err: VerificationError) -> anyhow::Error {
    let code = err.code();
    anyhow::Error::new(err).context(code)
}
