//! Unpaywall open-access registry lookup.
//!
//! First source in the chain: asks the Unpaywall API whether a legal
//! open-access copy exists for the DOI.
//! API documentation: <https://unpaywall.org/api/v2>

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::ResolutionRequest;
use crate::sources::{PdfSource, RequiredField, SourceError};
use crate::utils::{normalize_doi, HttpClient};

const UNPAYWALL_API_BASE: &str = "https://api.unpaywall.org/v2";

/// Unpaywall acquisition source.
///
/// The API requires a contact email (free, no key needed). Success means
/// the best open-access location declares a direct PDF URL.
#[derive(Debug, Clone)]
pub struct UnpaywallSource {
    client: HttpClient,
    base_url: String,
    email: String,
}

impl UnpaywallSource {
    pub fn new(client: HttpClient, email: impl Into<String>) -> Self {
        Self::with_base_url(client, UNPAYWALL_API_BASE, email)
    }

    /// Point the source at a different endpoint (mock servers in tests)
    pub fn with_base_url(
        client: HttpClient,
        base_url: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            email: email.into(),
        }
    }
}

#[async_trait]
impl PdfSource for UnpaywallSource {
    fn id(&self) -> &str {
        "unpaywall"
    }

    fn name(&self) -> &str {
        "Unpaywall (Open Access)"
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

        let url = format!(
            "{}/{}?email={}",
            self.base_url,
            urlencoding::encode(&doi),
            urlencoding::encode(&self.email)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach Unpaywall: {}", e)))?;

        if response.status() == 404 {
            return Err(SourceError::NotFound(format!(
                "DOI not known to Unpaywall: {}",
                doi
            )));
        }

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Unpaywall returned status {}",
                response.status()
            )));
        }

        let record: UnpaywallRecord = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Unpaywall response: {}", e)))?;

        pdf_url_from_record(&record)
            .ok_or_else(|| SourceError::NotFound("No OA version available".to_string()))
    }
}

fn pdf_url_from_record(record: &UnpaywallRecord) -> Option<String> {
    record
        .best_oa_location
        .as_ref()
        .and_then(|loc| loc.url_for_pdf.clone())
        .filter(|url| !url.is_empty())
}

/// Unpaywall API response (the fields we care about)
#[derive(Debug, Deserialize)]
struct UnpaywallRecord {
    best_oa_location: Option<UnpaywallLocation>,
}

#[derive(Debug, Deserialize)]
struct UnpaywallLocation {
    url_for_pdf: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_url_from_record() {
        let record: UnpaywallRecord = serde_json::from_str(
            r#"{"best_oa_location": {"url_for_pdf": "https://repo.example/x.pdf"}}"#,
        )
        .unwrap();
        assert_eq!(
            pdf_url_from_record(&record).as_deref(),
            Some("https://repo.example/x.pdf")
        );
    }

    #[test]
    fn test_no_oa_location() {
        let record: UnpaywallRecord =
            serde_json::from_str(r#"{"best_oa_location": null}"#).unwrap();
        assert!(pdf_url_from_record(&record).is_none());

        // Location present but landing-page only.
        let record: UnpaywallRecord =
            serde_json::from_str(r#"{"best_oa_location": {"url_for_pdf": null}}"#).unwrap();
        assert!(pdf_url_from_record(&record).is_none());
    }
}
