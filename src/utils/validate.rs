//! Input validation for DOIs and URLs.

use thiserror::Error;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid DOI format: {0}")]
    InvalidDoi(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Normalize and validate a DOI.
///
/// Lowercases, strips `doi:` and `doi.org` URL prefixes, and checks the
/// `10.<registrant>/<suffix>` shape where the registrant code is at least
/// four digits.
pub fn normalize_doi(doi: &str) -> Result<String, ValidationError> {
    let doi = doi.trim().to_lowercase();

    if doi.is_empty() {
        return Err(ValidationError::InvalidDoi("empty DOI".to_string()));
    }

    let doi = doi.strip_prefix("doi:").unwrap_or(&doi);
    let doi = doi.strip_prefix("https://doi.org/").unwrap_or(doi);
    let doi = doi.strip_prefix("http://doi.org/").unwrap_or(doi);

    let rest = doi
        .strip_prefix("10.")
        .ok_or_else(|| ValidationError::InvalidDoi("DOI must start with '10.'".to_string()))?;

    let (registrant, suffix) = rest
        .split_once('/')
        .ok_or_else(|| ValidationError::InvalidDoi("DOI must contain a slash".to_string()))?;

    if registrant.len() < 4 || !registrant.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidDoi(
            "registrant code must be at least four digits".to_string(),
        ));
    }

    if suffix.is_empty() {
        return Err(ValidationError::InvalidDoi("empty DOI suffix".to_string()));
    }

    Ok(doi.to_string())
}

/// Validate that a string is an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    let parsed = url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl(format!(
                "invalid scheme: {}",
                other
            )))
        }
    }

    Ok(url.to_string())
}
