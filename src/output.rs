//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{
    Eligibility, Profile, StatusReport, VerificationRecord, VerificationStatus,
};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn status_label(status: VerificationStatus) -> String {
    match status {
        VerificationStatus::Verified => status.as_str().green().bold().to_string(),
        VerificationStatus::InReview => status.as_str().yellow().to_string(),
        VerificationStatus::Pending => status.as_str().dimmed().to_string(),
    }
}

const fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "not checked",
    }
}

/// Result of a `verify` run
#[derive(Debug, Serialize)]
pub struct VerifyResult {
    /// The record as persisted
    #[serde(flatten)]
    pub record: VerificationRecord,
}

impl VerifyResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let r = &self.record;
        println!("Verification for {}", r.user_id);
        println!("  Status: {}", status_label(r.status));
        println!("  Score:  {:.1}", r.score);
        println!();

        let handle = r.source_handle.as_deref().unwrap_or("-");
        println!("  Source ({handle}): {}", flag(r.source_verified));
        if let Some(failure) = r.source_evidence.as_ref().and_then(|e| e.failure.as_ref()) {
            println!("    {}", failure.to_string().red());
        }

        println!("  Documents: {}", flag(Some(r.documents_verified)));
        for doc in &r.document_results {
            match &doc.reason {
                Some(reason) if !doc.passed => println!("    {} {}: {reason}", "x".red(), doc.id),
                _ => println!("    {} {}", "ok".green(), doc.id),
            }
        }
        if let Some(failure) = &r.document_failure {
            println!("    {}", failure.to_string().red());
        }

        println!("  Identity: {}", flag(Some(r.identity_verified)));
        for method in r.identity_methods.keys() {
            println!("    {method}");
        }
    }
}

impl StatusReport {
    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                let status = status_label(self.status);
                println!("{}: {status} (score {:.1})", self.user_id, self.score);
                println!("  source:    {}", flag(self.source_verified));
                println!("  documents: {}", flag(Some(self.documents_verified)));
                println!("  identity:  {}", flag(Some(self.identity_verified)));
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl Eligibility {
    /// Render the decision based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.eligible {
                    println!("{}", "Eligible for verification".green());
                } else {
                    println!(
                        "{}: {}",
                        "Not eligible".red(),
                        self.reason.as_deref().unwrap_or("unknown reason")
                    );
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl Profile {
    /// Render the profile based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Profile: {}", self.user_id);
                println!("  Type: {}", self.profile_type);
                println!("  Verification record: {}", flag(Some(self.has_verification_record)));
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// A successful result
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
