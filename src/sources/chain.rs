//! The ordered acquisition chain.

use std::sync::Arc;

use super::PdfSource;
use crate::config::Config;
use crate::sources::SourceError;
use crate::utils::HttpClient;

/// All enabled sources in their fixed priority order.
///
/// Order is the contract: legitimate registries first, the shadow-library
/// fallback last. Unlike a keyed registry, the chain is a plain ordered
/// list because trial order is what callers depend on.
#[derive(Debug, Clone)]
pub struct SourceChain {
    sources: Vec<Arc<dyn PdfSource>>,
}

impl SourceChain {
    /// Build the default chain from configuration.
    ///
    /// Priority: Unpaywall, direct URL, CrossRef, arXiv, Sci-Hub. A
    /// source compiled out by its feature flag is simply absent; Sci-Hub
    /// is also dropped when disabled in the config.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let mut sources: Vec<Arc<dyn PdfSource>> = Vec::new();

        #[cfg(feature = "source-unpaywall")]
        {
            let client = HttpClient::api(config.source_timeout())?;
            sources.push(Arc::new(super::UnpaywallSource::new(
                client,
                config.contact_email.clone(),
            )));
        }

        #[cfg(feature = "source-direct-url")]
        {
            let client = HttpClient::browser(config.source_timeout())?;
            sources.push(Arc::new(super::DirectUrlSource::new(client)));
        }

        #[cfg(feature = "source-crossref")]
        {
            let client = HttpClient::api(config.source_timeout())?;
            sources.push(Arc::new(super::CrossRefSource::new(client)));
        }

        #[cfg(feature = "source-arxiv")]
        {
            let client = HttpClient::api(config.source_timeout())?;
            sources.push(Arc::new(super::ArxivSource::new(client)));
        }

        #[cfg(feature = "source-scihub")]
        {
            if config.scihub.enabled {
                let client = HttpClient::browser(config.source_timeout())?;
                sources.push(Arc::new(super::SciHubSource::new(
                    client,
                    config.scihub.mirrors.clone(),
                )));
            }
        }

        Ok(Self { sources })
    }

    /// Build a chain from explicit sources (tests, embedders)
    pub fn custom(sources: Vec<Arc<dyn PdfSource>>) -> Self {
        Self { sources }
    }

    /// Sources in trial order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn PdfSource>> {
        self.sources.iter()
    }

    /// Source IDs in trial order
    pub fn ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    /// Number of enabled sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source is enabled
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chain_order() {
        let config = Config::default();
        let chain = SourceChain::from_config(&config).unwrap();

        let mut expected: Vec<&str> = Vec::new();
        if cfg!(feature = "source-unpaywall") {
            expected.push("unpaywall");
        }
        if cfg!(feature = "source-direct-url") {
            expected.push("direct-url");
        }
        if cfg!(feature = "source-crossref") {
            expected.push("crossref");
        }
        if cfg!(feature = "source-arxiv") {
            expected.push("arxiv");
        }
        if cfg!(feature = "source-scihub") {
            expected.push("scihub");
        }

        assert_eq!(chain.ids(), expected);
    }

    #[cfg(feature = "source-scihub")]
    #[test]
    fn test_scihub_disabled_by_config() {
        let mut config = Config::default();
        config.scihub.enabled = false;

        let chain = SourceChain::from_config(&config).unwrap();
        assert!(!chain.ids().contains(&"scihub"));
    }
}
