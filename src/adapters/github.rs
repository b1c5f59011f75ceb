//! GitHub source-hosting verifier
//!
//! Looks a handle up through the GitHub REST API and turns the public
//! profile into a normalized 0-100 authenticity score.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::core::ports::{SourceCheck, SourceVerifier, VerifierError};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Minimum score for a profile to count as verified
pub const MIN_VERIFIED_SCORE: f64 = 40.0;

const MAX_HANDLE_LEN: usize = 39;

/// Subset of the `GET /users/{handle}` response used for scoring
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    /// Login name
    pub login: String,
    /// Account type ("User" or "Organization")
    #[serde(rename = "type", default)]
    pub account_type: String,
    /// Number of public repositories
    #[serde(default)]
    pub public_repos: u64,
    /// Number of followers
    #[serde(default)]
    pub followers: u64,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

/// Source verifier backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubVerifier {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GithubVerifier {
    /// Create a verifier
    pub fn new(
        api_base: &str,
        token: Option<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl SourceVerifier for GithubVerifier {
    async fn verify_profile(&self, handle: &str) -> Result<SourceCheck, VerifierError> {
        if !is_valid_handle(handle) {
            return Err(VerifierError::Rejected(format!("'{handle}' is not a valid GitHub handle")));
        }

        let url = format!("{}/users/{handle}", self.api_base);
        let mut request = self.client.get(&url).header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| VerifierError::Transient(e.to_string()))?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(VerifierError::Rejected(format!("GitHub user '{handle}' not found")));
            },
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                return Err(VerifierError::Transient("GitHub rate limit reached".to_string()));
            },
            status if !status.is_success() => {
                return Err(VerifierError::Transient(format!("GitHub returned {status}")));
            },
            _ => {},
        }

        let raw: serde_json::Value =
            response.json().await.map_err(|e| VerifierError::Transient(e.to_string()))?;
        let user: GithubUser = serde_json::from_value(raw.clone())
            .map_err(|e| VerifierError::Transient(format!("unexpected GitHub response: {e}")))?;

        let score = profile_score(&user, Utc::now());
        log::debug!("GitHub profile {} scored {score:.1}", user.login);
        Ok(SourceCheck {
            verified: user.account_type == "User" && score >= MIN_VERIFIED_SCORE,
            score,
            raw: serde_json::json!({ "profile": raw, "computed_score": score }),
        })
    }
}

/// GitHub handle rules: 1-39 alphanumerics or single inner hyphens
#[must_use]
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle.len() <= MAX_HANDLE_LEN
        && handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !handle.starts_with('-')
        && !handle.ends_with('-')
        && !handle.contains("--")
}

/// Score a profile: account age (40), public repos (30), followers (30)
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn profile_score(user: &GithubUser, now: DateTime<Utc>) -> f64 {
    let age_years = (now - user.created_at).num_days().max(0) as f64 / 365.0;
    let age = (age_years / 5.0).min(1.0) * 40.0;
    let repos = (user.public_repos as f64 / 20.0).min(1.0) * 30.0;
    let followers = (user.followers as f64 / 50.0).min(1.0) * 30.0;
    ((age + repos + followers) * 10.0).round() / 10.0
}
