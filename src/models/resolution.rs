//! Resolution outcome models.

use serde::{Deserialize, Serialize};

/// How a single source attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttemptOutcome {
    /// The source produced a direct PDF URL
    Success,
    /// The source answered but has no matching document
    NotFound,
    /// Transport failure, timeout, or bad response talking to the source
    Error,
}

/// The record of one source's outcome.
///
/// Attempts are accumulated in trial order. At most one attempt carries
/// `Success`, and when present it is the last entry: the chain halts as
/// soon as a source delivers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAttempt {
    /// Source display name (e.g. "Unpaywall")
    pub source: String,

    /// Outcome of this attempt
    pub outcome: AttemptOutcome,

    /// Direct PDF URL, present iff the attempt succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,

    /// Failure detail, present iff the attempt did not succeed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceAttempt {
    /// Record a successful attempt
    pub fn success(source: impl Into<String>, pdf_url: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            outcome: AttemptOutcome::Success,
            pdf_url: Some(pdf_url.into()),
            error: None,
        }
    }

    /// Record an attempt where the source had no matching document
    pub fn not_found(source: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            outcome: AttemptOutcome::NotFound,
            pdf_url: None,
            error: Some(detail.into()),
        }
    }

    /// Record an attempt that failed with a transport or API error
    pub fn error(source: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            outcome: AttemptOutcome::Error,
            pdf_url: None,
            error: Some(detail.into()),
        }
    }

    /// Whether this attempt produced a PDF URL
    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Success
    }
}

/// Terminal output of a resolution run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// Whether any source produced a PDF URL
    pub success: bool,

    /// The winning PDF URL, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,

    /// Display name of the source that satisfied the request, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Human-readable failure summary, on exhaustion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Every source tried, in order, up to and including the winner
    pub attempted_sources: Vec<SourceAttempt>,
}

impl ResolutionResult {
    /// Build a successful result from the winning (last) attempt.
    ///
    /// `attempts` must end with a `Success` entry; its URL and source name
    /// are lifted to the top level.
    pub fn found(attempts: Vec<SourceAttempt>) -> Self {
        let winner = attempts
            .last()
            .filter(|a| a.is_success())
            .cloned()
            .unwrap_or_else(|| SourceAttempt::error("unknown", "no winning attempt recorded"));

        Self {
            success: winner.is_success(),
            pdf_url: winner.pdf_url,
            source: Some(winner.source),
            message: None,
            attempted_sources: attempts,
        }
    }

    /// Build a failure result carrying the full diagnostic trail
    pub fn exhausted(attempts: Vec<SourceAttempt>) -> Self {
        Self {
            success: false,
            pdf_url: None,
            source: None,
            message: Some("PDF not found in any source".to_string()),
            attempted_sources: attempts,
        }
    }
}

/// Raw bytes of a retrieved PDF plus its origin URL
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    /// The URL the document was fetched from
    pub pdf_url: String,

    /// Raw file content
    pub bytes: Vec<u8>,
}

impl RetrievedDocument {
    /// Number of bytes retrieved
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document body is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
