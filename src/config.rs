//! Configuration management
//!
//! Deployment configuration: scoring constants, orchestrator tunables,
//! storage location and upstream verifier settings.
//! Config is stored at `~/.config/mentor-verify/config.toml` (XDG standard).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::adapters::documents::{DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_BYTES};
use crate::core::services::{OrchestratorSettings, StatusPolicy, TrustWeights};
use crate::paths;

/// mentor-verify configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weight table and thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Orchestrator tunables
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
    /// Where records and profiles live
    #[serde(default)]
    pub storage: StorageConfig,
    /// GitHub verifier settings
    #[serde(default)]
    pub github: GithubConfig,
    /// Document verifier settings
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weight table and status thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Source-hosting weight (`Wg`)
    #[serde(default = "default_source_weight")]
    pub source_weight: f64,
    /// Document weight (`Wd`)
    #[serde(default = "default_document_weight")]
    pub document_weight: f64,
    /// Identity weight (`Wi`)
    #[serde(default = "default_identity_weight")]
    pub identity_weight: f64,
    /// Minimum score for `verified`
    #[serde(default = "default_verified_threshold")]
    pub verified_threshold: f64,
}

const fn default_source_weight() -> f64 {
    TrustWeights::DEFAULT_SOURCE
}

const fn default_document_weight() -> f64 {
    TrustWeights::DEFAULT_DOCUMENTS
}

const fn default_identity_weight() -> f64 {
    TrustWeights::DEFAULT_IDENTITY
}

const fn default_verified_threshold() -> f64 {
    StatusPolicy::DEFAULT_VERIFIED_THRESHOLD
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            source_weight: default_source_weight(),
            document_weight: default_document_weight(),
            identity_weight: default_identity_weight(),
            verified_threshold: default_verified_threshold(),
        }
    }
}

/// Orchestrator tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Reload-and-reapply attempts after a lost write race
    #[serde(default = "default_max_conflict_retries")]
    pub max_conflict_retries: u32,
    /// Upper bound on one verifier call, in seconds
    #[serde(default = "default_verifier_timeout_secs")]
    pub verifier_timeout_secs: u64,
}

const fn default_max_conflict_retries() -> u32 {
    3
}

const fn default_verifier_timeout_secs() -> u64 {
    10
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: default_max_conflict_retries(),
            verifier_timeout_secs: default_verifier_timeout_secs(),
        }
    }
}

/// Storage location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory (defaults to the platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// GitHub verifier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Optional API token (raises rate limits)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// User-Agent header sent to GitHub
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("mentor-verify/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Document verifier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Maximum size of one document in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// Accepted MIME types
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

const fn default_max_bytes() -> usize {
    DEFAULT_MAX_BYTES
}

fn default_allowed_types() -> Vec<String> {
    DEFAULT_ALLOWED_TYPES.iter().map(ToString::to_string).collect()
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_types: default_allowed_types(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:7878".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from `path`, or from the default location
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.settings()?;
        Ok(config)
    }

    /// Save config to `path`, or to the default location
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, self.to_toml()?)?;
        Ok(path)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Effective data directory
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(paths::default_data_dir)
    }

    /// Validated orchestrator settings
    pub fn settings(&self) -> anyhow::Result<OrchestratorSettings> {
        let weights = TrustWeights::new(
            self.scoring.source_weight,
            self.scoring.document_weight,
            self.scoring.identity_weight,
        )?;
        let threshold = self.scoring.verified_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            anyhow::bail!("verified_threshold must be within 0..=100, got {threshold}");
        }
        Ok(OrchestratorSettings {
            weights,
            policy: StatusPolicy {
                verified_threshold: threshold,
            },
            max_conflict_retries: self.orchestrator.max_conflict_retries,
            verifier_timeout: Duration::from_secs(self.orchestrator.verifier_timeout_secs),
        })
    }
}
