//! arXiv title search.
//!
//! Fourth source in the chain: an exact-phrase title query against the
//! arXiv Atom API, taking the single best hit and deriving its PDF URL
//! from the abstract-page identifier.

use async_trait::async_trait;
use feed_rs::parser;

use crate::models::ResolutionRequest;
use crate::sources::{PdfSource, RequiredField, SourceError};
use crate::utils::HttpClient;

/// Base URL for arXiv API
const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
/// Base URL for arXiv PDFs
const ARXIV_PDF_URL: &str = "https://arxiv.org/pdf";

/// arXiv acquisition source
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: HttpClient,
    api_url: String,
}

impl ArxivSource {
    pub fn new(client: HttpClient) -> Self {
        Self::with_api_url(client, ARXIV_API_URL)
    }

    /// Point the source at a different endpoint (mock servers in tests)
    pub fn with_api_url(client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl PdfSource for ArxivSource {
    fn id(&self) -> &str {
        "arxiv"
    }

    fn name(&self) -> &str {
        "arXiv"
    }

    fn requires(&self) -> RequiredField {
        RequiredField::Title
    }

    async fn locate(&self, request: &ResolutionRequest) -> Result<String, SourceError> {
        let title = request
            .title
            .as_deref()
            .ok_or_else(|| SourceError::InvalidRequest("missing title".to_string()))?;

        let search_query = format!("ti:\"{}\"", title);
        let url = format!(
            "{}?search_query={}&max_results=1",
            self.api_url,
            urlencoding::encode(&search_query)
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/atom+xml")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach arXiv: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "arXiv returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read arXiv response: {}", e)))?;

        let feed = parser::parse(bytes.as_ref())
            .map_err(|e| SourceError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

        let entry = feed
            .entries
            .first()
            .ok_or_else(|| SourceError::NotFound("Not found on arXiv".to_string()))?;

        pdf_url_from_entry_id(&entry.id)
            .ok_or_else(|| SourceError::Parse(format!("Unexpected arXiv entry id: {}", entry.id)))
    }
}

/// Derive the PDF URL from an entry id like
/// `http://arxiv.org/abs/2301.12345v1`
fn pdf_url_from_entry_id(entry_id: &str) -> Option<String> {
    let arxiv_id = entry_id.split("/abs/").nth(1)?.trim();
    if arxiv_id.is_empty() {
        return None;
    }
    Some(format!("{}/{}.pdf", ARXIV_PDF_URL, arxiv_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_url_from_entry_id() {
        assert_eq!(
            pdf_url_from_entry_id("http://arxiv.org/abs/2301.12345v1").as_deref(),
            Some("https://arxiv.org/pdf/2301.12345v1.pdf")
        );
        assert_eq!(
            pdf_url_from_entry_id("https://arxiv.org/abs/math.GT/0104020").as_deref(),
            Some("https://arxiv.org/pdf/math.GT/0104020.pdf")
        );
    }

    #[test]
    fn test_pdf_url_from_entry_id_rejects_non_abs() {
        assert!(pdf_url_from_entry_id("http://arxiv.org/feed").is_none());
        assert!(pdf_url_from_entry_id("http://arxiv.org/abs/").is_none());
    }

    #[test]
    fn test_feed_fixture_parses() {
        let feed_xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <feed xmlns="http://www.w3.org/2005/Atom">
            <title>ArXiv Query Results</title>
            <entry>
                <id>http://arxiv.org/abs/2301.12345v2</id>
                <title>Attention Is All You Need</title>
                <summary>An abstract.</summary>
                <author><name>A. Author</name></author>
            </entry>
        </feed>"#;

        let feed = parser::parse(feed_xml.as_bytes()).unwrap();
        let entry = feed.entries.first().unwrap();
        assert_eq!(
            pdf_url_from_entry_id(&entry.id).as_deref(),
            Some("https://arxiv.org/pdf/2301.12345v2.pdf")
        );
    }
}
