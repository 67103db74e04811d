//! Resolution request model.

use serde::{Deserialize, Serialize};

/// Bibliographic identifiers for a single work.
///
/// Any subset of the fields may be present. Sources that depend on a
/// missing field are skipped without being recorded as an attempt, so an
/// empty request resolves to a failure with an empty attempt list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionRequest {
    /// Digital Object Identifier, e.g. "10.1038/nature12345"
    pub doi: Option<String>,

    /// Landing-page URL (publisher or repository page, or a direct PDF link)
    pub landing_url: Option<String>,

    /// Paper title, used for exact-phrase preprint search
    pub title: Option<String>,
}

impl ResolutionRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DOI
    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Set the landing-page URL
    pub fn landing_url(mut self, url: impl Into<String>) -> Self {
        self.landing_url = Some(url.into());
        self
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether any identifier is populated
    pub fn has_identifier(&self) -> bool {
        self.doi.is_some() || self.landing_url.is_some() || self.title.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = ResolutionRequest::new()
            .doi("10.1234/abc")
            .title("A Test Paper");

        assert_eq!(request.doi.as_deref(), Some("10.1234/abc"));
        assert_eq!(request.title.as_deref(), Some("A Test Paper"));
        assert!(request.landing_url.is_none());
        assert!(request.has_identifier());
    }

    #[test]
    fn test_empty_request() {
        let request = ResolutionRequest::new();
        assert!(!request.has_identifier());
    }
}
