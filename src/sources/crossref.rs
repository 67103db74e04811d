//! CrossRef metadata-link lookup.
//!
//! Publishers sometimes register full-text links alongside a work's
//! CrossRef metadata; this source inspects them for one explicitly typed
//! as PDF.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::ResolutionRequest;
use crate::sources::{PdfSource, RequiredField, SourceError};
use crate::utils::{normalize_doi, HttpClient};

const CROSSREF_API_BASE: &str = "https://api.crossref.org";

/// CrossRef acquisition source
#[derive(Debug, Clone)]
pub struct CrossRefSource {
    client: HttpClient,
    base_url: String,
}

impl CrossRefSource {
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, CROSSREF_API_BASE)
    }

    /// Point the source at a different endpoint (mock servers in tests)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PdfSource for CrossRefSource {
    fn id(&self) -> &str {
        "crossref"
    }

    fn name(&self) -> &str {
        "CrossRef"
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

        let url = format!("{}/works/{}", self.base_url, urlencoding::encode(&doi));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach CrossRef: {}", e)))?;

        if response.status() == 404 {
            return Err(SourceError::NotFound(format!(
                "DOI not known to CrossRef: {}",
                doi
            )));
        }

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "CrossRef returned status {}",
                response.status()
            )));
        }

        let data: CRResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse CrossRef response: {}", e)))?;

        pdf_link(&data.message)
            .ok_or_else(|| SourceError::NotFound("No PDF link in CrossRef metadata".to_string()))
    }
}

/// First declared link explicitly typed as PDF, if any
fn pdf_link(work: &CRWork) -> Option<String> {
    work.link
        .iter()
        .flatten()
        .find(|link| link.content_type.as_deref() == Some("application/pdf"))
        .map(|link| link.url.clone())
}

// ===== CrossRef API Types =====

#[derive(Debug, Deserialize)]
struct CRResponse {
    message: CRWork,
}

#[derive(Debug, Deserialize)]
struct CRWork {
    link: Option<Vec<CRLink>>,
}

#[derive(Debug, Deserialize)]
struct CRLink {
    #[serde(rename = "URL")]
    url: String,
    #[serde(rename = "content-type")]
    content_type: Option<String>,
}
