//! Acquisition source plugins with a uniform trait-based interface.
//!
//! This module defines the [`PdfSource`] trait that every acquisition
//! strategy implements, and the [`SourceChain`] that holds them in their
//! fixed priority order. Adding, removing, or reordering a source is a
//! one-line change in [`SourceChain::from_config`].
//!
//! # Feature Flags
//!
//! Individual sources can be disabled at compile time using Cargo features:
//!
//! - `unpaywall` - Open-access registry lookup (default: enabled)
//! - `direct-url` - Landing-page probe and scan (default: enabled)
//! - `crossref` - CrossRef metadata link lookup (default: enabled)
//! - `arxiv` - arXiv title search (default: enabled)
//! - `scihub` - Sci-Hub mirror lookup (default: enabled, also gated at
//!   runtime by `[scihub] enabled` in the config file)
//!
//! The `open-access-only` feature group builds everything except the
//! Sci-Hub fallback.

#[cfg(feature = "source-arxiv")]
mod arxiv;
mod chain;
#[cfg(feature = "source-crossref")]
mod crossref;
#[cfg(feature = "source-direct-url")]
mod direct_url;
#[cfg(feature = "source-scihub")]
mod scihub;
#[cfg(feature = "source-unpaywall")]
mod unpaywall;

pub mod mock;

pub use chain::SourceChain;
pub use mock::MockPdfSource;

#[cfg(feature = "source-arxiv")]
pub use arxiv::ArxivSource;
#[cfg(feature = "source-crossref")]
pub use crossref::CrossRefSource;
#[cfg(feature = "source-direct-url")]
pub use direct_url::DirectUrlSource;
#[cfg(feature = "source-scihub")]
pub use scihub::SciHubSource;
#[cfg(feature = "source-unpaywall")]
pub use unpaywall::UnpaywallSource;

use crate::models::ResolutionRequest;
use async_trait::async_trait;

/// The request field a source depends on. A source whose field is absent
/// from the request is skipped without being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Doi,
    LandingUrl,
    Title,
}

/// One acquisition strategy: given bibliographic identifiers, try to
/// produce a direct PDF URL.
///
/// # Implementing a New Source
///
/// 1. Create a struct holding an `HttpClient` and any endpoint state
/// 2. Implement `id`, `name`, `requires`, and `locate`
/// 3. Register it at the right priority in `SourceChain::from_config`
#[async_trait]
pub trait PdfSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "unpaywall")
    fn id(&self) -> &str;

    /// Human-readable name (e.g. "Unpaywall (Open Access)")
    fn name(&self) -> &str;

    /// Which request field this source needs to run
    fn requires(&self) -> RequiredField;

    /// Whether the request carries the field this source needs
    fn applicable(&self, request: &ResolutionRequest) -> bool {
        match self.requires() {
            RequiredField::Doi => request.doi.is_some(),
            RequiredField::LandingUrl => request.landing_url.is_some(),
            RequiredField::Title => request.title.is_some(),
        }
    }

    /// Attempt to locate a direct PDF URL for the request.
    ///
    /// Returns the URL on success. `SourceError::NotFound` means the
    /// source answered but has no matching document; any other error is a
    /// transport or protocol failure. Neither halts the chain.
    async fn locate(&self, request: &ResolutionRequest) -> Result<String, SourceError>;
}

/// Errors that can occur when querying a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source responded but has no matching document
    #[error("{0}")]
    NotFound(String),

    /// Network failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the source
    #[error("API error: {0}")]
    Api(String),

    /// Malformed payload (JSON, HTML, Atom)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Programmer-error-class input (required field missing past the
    /// applicability check)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SourceError {
    /// Whether this is a "source answered, no document" outcome rather
    /// than a failure talking to the source
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(SourceError::NotFound("no OA location".to_string()).is_not_found());
        assert!(!SourceError::Network("timed out".to_string()).is_not_found());
        assert!(!SourceError::Api("status 500".to_string()).is_not_found());
    }
}
