//! The document resolver: ordered source trial plus the final transfer.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{ResolutionRequest, ResolutionResult, RetrievedDocument, SourceAttempt};
use crate::sources::{SourceChain, SourceError};
use crate::utils::HttpClient;

/// Errors from the final PDF transfer.
///
/// Unlike per-source errors these are surfaced to the caller: a source
/// already claimed success, so a failed retrieval must be visible.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network failure or timeout during the transfer
    #[error("Download failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Download failed with status {0}")]
    Status(reqwest::StatusCode),

    /// The transfer completed but the body was zero-length
    #[error("Downloaded file is empty")]
    EmptyBody,
}

/// Tries each enabled source in priority order and retrieves the winner.
///
/// `resolve` never fails for expected conditions — per-source errors are
/// folded into the attempt trail and the chain continues. Only
/// [`Resolver::download`] returns errors.
#[derive(Debug, Clone)]
pub struct Resolver {
    chain: SourceChain,
    downloader: HttpClient,
}

impl Resolver {
    /// Build a resolver with the default chain for this configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let chain = SourceChain::from_config(config)?;
        let downloader =
            HttpClient::downloader(config.download_timeout(), config.network.max_redirects)?;

        Ok(Self { chain, downloader })
    }

    /// Build a resolver over an explicit chain (tests, embedders)
    pub fn with_chain(chain: SourceChain, downloader: HttpClient) -> Self {
        Self { chain, downloader }
    }

    /// The chain this resolver trials
    pub fn chain(&self) -> &SourceChain {
        &self.chain
    }

    /// Try each applicable source in order, stopping at the first success.
    ///
    /// Sources whose required identifier is absent are skipped without
    /// being recorded. The returned attempt list covers every source that
    /// actually ran, in order, ending with the winner when there is one.
    pub async fn resolve(&self, request: &ResolutionRequest) -> ResolutionResult {
        let mut attempts: Vec<SourceAttempt> = Vec::new();

        for source in self.chain.iter() {
            if !source.applicable(request) {
                debug!(source = source.id(), "skipped: required identifier absent");
                continue;
            }

            debug!(source = source.id(), "trying source");
            match source.locate(request).await {
                Ok(pdf_url) => {
                    info!(source = source.id(), %pdf_url, "PDF located");
                    attempts.push(SourceAttempt::success(source.name(), pdf_url));
                    return ResolutionResult::found(attempts);
                }
                Err(e) if e.is_not_found() => {
                    debug!(source = source.id(), "no document: {}", e);
                    attempts.push(SourceAttempt::not_found(source.name(), e.to_string()));
                }
                Err(e) => {
                    debug!(source = source.id(), "source failed: {}", e);
                    attempts.push(SourceAttempt::error(source.name(), e.to_string()));
                }
            }
        }

        info!(
            attempted = attempts.len(),
            "no source produced a PDF URL"
        );
        ResolutionResult::exhausted(attempts)
    }

    /// Fetch a located PDF as raw bytes. Single attempt; the caller may
    /// re-invoke.
    pub async fn download(&self, pdf_url: &str) -> Result<RetrievedDocument, DownloadError> {
        info!(%pdf_url, "downloading PDF");

        let response = self
            .downloader
            .get(pdf_url)
            .send()
            .await
            .map_err(|e| DownloadError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::Transport(e.to_string()))?;

        if bytes.is_empty() {
            return Err(DownloadError::EmptyBody);
        }

        info!(bytes = bytes.len(), "PDF downloaded");
        Ok(RetrievedDocument {
            pdf_url: pdf_url.to_string(),
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttemptOutcome;
    use crate::sources::{MockPdfSource, RequiredField};
    use std::sync::Arc;
    use std::time::Duration;

    fn resolver_with(sources: Vec<Arc<dyn crate::sources::PdfSource>>) -> Resolver {
        Resolver::with_chain(
            SourceChain::custom(sources),
            HttpClient::downloader(Duration::from_secs(5), 10).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_empty_request_attempts_nothing() {
        let first = Arc::new(MockPdfSource::succeeding(
            "first",
            RequiredField::Doi,
            "https://example.com/x.pdf",
        ));
        let resolver = resolver_with(vec![first.clone()]);

        let result = resolver.resolve(&ResolutionRequest::new()).await;

        assert!(!result.success);
        assert!(result.attempted_sources.is_empty());
        assert_eq!(first.call_count(), 0);
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let first = Arc::new(MockPdfSource::succeeding(
            "first",
            RequiredField::Doi,
            "https://example.com/x.pdf",
        ));
        let second = Arc::new(MockPdfSource::succeeding(
            "second",
            RequiredField::Doi,
            "https://example.com/y.pdf",
        ));
        let resolver = resolver_with(vec![first.clone(), second.clone()]);

        let request = ResolutionRequest::new().doi("10.1234/abc");
        let result = resolver.resolve(&request).await;

        assert!(result.success);
        assert_eq!(result.pdf_url.as_deref(), Some("https://example.com/x.pdf"));
        assert_eq!(result.source.as_deref(), Some("first"));
        assert_eq!(result.attempted_sources.len(), 1);
        assert_eq!(second.call_count(), 0);
    }

    #[tokio::test]
    async fn test_error_continues_chain() {
        let first = Arc::new(MockPdfSource::failing(
            "first",
            RequiredField::Doi,
            SourceError::Network("timed out".to_string()),
        ));
        let second = Arc::new(MockPdfSource::succeeding(
            "second",
            RequiredField::Doi,
            "https://example.com/y.pdf",
        ));
        let resolver = resolver_with(vec![first, second]);

        let request = ResolutionRequest::new().doi("10.1234/abc");
        let result = resolver.resolve(&request).await;

        assert!(result.success);
        assert_eq!(result.source.as_deref(), Some("second"));
        assert_eq!(result.attempted_sources.len(), 2);
        assert_eq!(result.attempted_sources[0].outcome, AttemptOutcome::Error);
        assert_eq!(
            result.attempted_sources[0].error.as_deref(),
            Some("Network error: timed out")
        );
        assert_eq!(result.attempted_sources[1].outcome, AttemptOutcome::Success);
    }

    #[tokio::test]
    async fn test_exhaustion_collects_all_attempts() {
        let sources: Vec<Arc<dyn crate::sources::PdfSource>> = vec![
            Arc::new(MockPdfSource::failing(
                "a",
                RequiredField::Doi,
                SourceError::NotFound("no OA version".to_string()),
            )),
            Arc::new(MockPdfSource::failing(
                "b",
                RequiredField::Title,
                SourceError::Api("status 500".to_string()),
            )),
        ];
        let resolver = resolver_with(sources);

        let request = ResolutionRequest::new().doi("10.1234/abc").title("T");
        let result = resolver.resolve(&request).await;

        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("PDF not found in any source"));
        assert_eq!(result.attempted_sources.len(), 2);
        assert_eq!(
            result.attempted_sources[0].outcome,
            AttemptOutcome::NotFound
        );
        assert_eq!(result.attempted_sources[1].outcome, AttemptOutcome::Error);
    }

    #[tokio::test]
    async fn test_inapplicable_sources_not_recorded() {
        let doi_source = Arc::new(MockPdfSource::failing(
            "doi-source",
            RequiredField::Doi,
            SourceError::NotFound("nope".to_string()),
        ));
        let url_source = Arc::new(MockPdfSource::succeeding(
            "url-source",
            RequiredField::LandingUrl,
            "https://example.com/x.pdf",
        ));
        let title_source = Arc::new(MockPdfSource::succeeding(
            "title-source",
            RequiredField::Title,
            "https://example.com/y.pdf",
        ));
        let resolver = resolver_with(vec![doi_source, url_source.clone(), title_source.clone()]);

        // DOI only: landing-url and title sources must not even run.
        let request = ResolutionRequest::new().doi("10.1234/abc");
        let result = resolver.resolve(&request).await;

        assert!(!result.success);
        assert_eq!(result.attempted_sources.len(), 1);
        assert_eq!(result.attempted_sources[0].source, "doi-source");
        assert_eq!(url_source.call_count(), 0);
        assert_eq!(title_source.call_count(), 0);
    }
}
