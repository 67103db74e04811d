//! Sci-Hub mirror lookup.
//!
//! Last resort in the chain. Tries a fixed list of mirrors in order,
//! fetching the DOI-keyed page with a browser identity and scanning for
//! the embedded PDF viewer. Legality varies by jurisdiction; the source
//! can be disabled in configuration independently of the others, or
//! excluded entirely by building without the `scihub` feature.

use async_trait::async_trait;

use crate::models::ResolutionRequest;
use crate::sources::{PdfSource, RequiredField, SourceError};
use crate::utils::{find_pdf_embed, normalize_doi, HttpClient};

/// Sci-Hub acquisition source
#[derive(Debug, Clone)]
pub struct SciHubSource {
    client: HttpClient,
    mirrors: Vec<String>,
}

impl SciHubSource {
    pub fn new(client: HttpClient, mirrors: Vec<String>) -> Self {
        Self { client, mirrors }
    }

    /// Fetch one mirror's page for the DOI and extract the viewer source
    async fn try_mirror(&self, mirror: &str, doi: &str) -> Result<Option<String>, SourceError> {
        let url = format!("{}/{}", mirror, doi);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("{}: {}", mirror, e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "{} returned status {}",
                mirror,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("{}: {}", mirror, e)))?;

        Ok(find_pdf_embed(&body).map(|src| absolutize(&src, mirror)))
    }
}

#[async_trait]
impl PdfSource for SciHubSource {
    fn id(&self) -> &str {
        "scihub"
    }

    fn name(&self) -> &str {
        "Sci-Hub"
    }

    fn requires(&self) -> RequiredField {
        RequiredField::Doi
    }

    async fn locate(&self, request: &ResolutionRequest) -> Result<String, SourceError> {
        let doi = request
            .doi
            .as_deref()
            .ok_or_else(|| SourceError::InvalidRequest("missing DOI".to_string()))?;
        let doi = normalize_doi(doi)
            .map_err(|e| SourceError::InvalidRequest(e.to_string()))?;

        // Same one-attempt-then-next discipline as the outer chain: a
        // failing mirror never stops the iteration.
        for mirror in &self.mirrors {
            match self.try_mirror(mirror, &doi).await {
                Ok(Some(pdf_url)) => {
                    tracing::debug!(%mirror, %pdf_url, "mirror yielded a viewer source");
                    return Ok(pdf_url);
                }
                Ok(None) => {
                    tracing::debug!(%mirror, "no embedded viewer on mirror page");
                }
                Err(e) => {
                    tracing::debug!(%mirror, error = %e, "mirror failed");
                }
            }
        }

        Err(SourceError::NotFound(
            "Not available on any Sci-Hub mirror".to_string(),
        ))
    }
}

/// Normalize a viewer `src` attribute to an absolute URL.
///
/// Mirrors emit protocol-relative (`//host/…`) and root-relative
/// (`/downloads/…`) sources as well as absolute ones.
fn absolutize(src: &str, mirror: &str) -> String {
    if let Some(rest) = src.strip_prefix("//") {
        format!("https://{}", rest)
    } else if src.starts_with('/') {
        format!("{}{}", mirror, src)
    } else {
        src.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize_protocol_relative() {
        assert_eq!(
            absolutize("//dacemirror.example/journal/x.pdf", "https://sci-hub.se"),
            "https://dacemirror.example/journal/x.pdf"
        );
    }

    #[test]
    fn test_absolutize_root_relative() {
        assert_eq!(
            absolutize("/downloads/2023/x.pdf", "https://sci-hub.se"),
            "https://sci-hub.se/downloads/2023/x.pdf"
        );
    }

    #[test]
    fn test_absolutize_absolute_untouched() {
        assert_eq!(
            absolutize("https://cdn.example/x.pdf", "https://sci-hub.se"),
            "https://cdn.example/x.pdf"
        );
    }
}
