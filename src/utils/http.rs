//! HTTP client utilities.

use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Conventional browser identity. Several publishers and all Sci-Hub
/// mirrors serve documents only to browser-looking agents.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Shared HTTP client with role-specific constructors
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Client for JSON/Atom API calls, identified as this crate
    pub fn api(timeout: Duration) -> Result<Self, reqwest::Error> {
        let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        Self::build(user_agent, timeout, Policy::limited(5))
    }

    /// Client for landing-page and mirror scraping, identified as a browser
    pub fn browser(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::build(BROWSER_USER_AGENT, timeout, Policy::limited(5))
    }

    /// Client for the final PDF transfer: long timeout, generous redirect
    /// allowance, browser identity
    pub fn downloader(timeout: Duration, max_redirects: usize) -> Result<Self, reqwest::Error> {
        Self::build(BROWSER_USER_AGENT, timeout, Policy::limited(max_redirects))
    }

    fn build(
        user_agent: &str,
        timeout: Duration,
        redirects: Policy,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .redirect(redirects)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    /// Start a HEAD request
    pub fn head(&self, url: &str) -> RequestBuilder {
        self.client.head(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(HttpClient::api(Duration::from_secs(15)).is_ok());
        assert!(HttpClient::browser(Duration::from_secs(15)).is_ok());
        assert!(HttpClient::downloader(Duration::from_secs(60), 10).is_ok());
    }
}
