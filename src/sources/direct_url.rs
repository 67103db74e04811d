//! Direct landing-URL probe.
//!
//! Second source in the chain. If the item's URL already ends in `.pdf`,
//! a header-only request confirms the content type; otherwise the page
//! body is fetched and scanned for a PDF-looking hyperlink.

use async_trait::async_trait;
use url::Url;

use crate::models::ResolutionRequest;
use crate::sources::{PdfSource, RequiredField, SourceError};
use crate::utils::{find_pdf_link, HttpClient};

/// Landing-page acquisition source
#[derive(Debug, Clone)]
pub struct DirectUrlSource {
    client: HttpClient,
}

impl DirectUrlSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Header-only check that a `.pdf`-suffixed URL really serves a PDF
    async fn probe_pdf_head(&self, url: &str) -> Result<bool, SourceError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("HEAD request failed: {}", e)))?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let is_pdf = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("pdf"))
            .unwrap_or(false);

        Ok(is_pdf)
    }
}

#[async_trait]
impl PdfSource for DirectUrlSource {
    fn id(&self) -> &str {
        "direct-url"
    }

    fn name(&self) -> &str {
        "Direct URL"
    }

    fn requires(&self) -> RequiredField {
        RequiredField::LandingUrl
    }

    async fn locate(&self, request: &ResolutionRequest) -> Result<String, SourceError> {
        let raw_url = request
            .landing_url
            .as_deref()
            .ok_or_else(|| SourceError::InvalidRequest("missing landing URL".to_string()))?;

        let page_url = Url::parse(raw_url)
            .map_err(|e| SourceError::InvalidRequest(format!("bad landing URL: {}", e)))?;

        // A .pdf suffix is probably the document itself; confirm cheaply.
        // On a mismatch fall through to the page scan below.
        if raw_url.to_lowercase().ends_with(".pdf") && self.probe_pdf_head(raw_url).await? {
            return Ok(raw_url.to_string());
        }

        let response = self
            .client
            .get(raw_url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch page: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Landing page returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read page body: {}", e)))?;

        find_pdf_link(&body, &page_url)
            .ok_or_else(|| SourceError::NotFound("No PDF link found on page".to_string()))
    }
}
