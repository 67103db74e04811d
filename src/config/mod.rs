//! Configuration management.
//!
//! Settings come from an optional TOML file plus `PDF_FINDER_*` environment
//! overrides:
//!
//! ```toml
//! contact_email = "you@example.org"
//!
//! [network]
//! source_timeout_secs = 15
//! download_timeout_secs = 60
//! max_redirects = 10
//!
//! [scihub]
//! enabled = true
//! mirrors = ["https://sci-hub.se", "https://sci-hub.st", "https://sci-hub.ru"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Contact email sent to Unpaywall (required by their API terms)
    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    /// Network timeouts and limits
    #[serde(default)]
    pub network: NetworkConfig,

    /// Sci-Hub fallback settings
    #[serde(default)]
    pub scihub: SciHubConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contact_email: default_contact_email(),
            network: NetworkConfig::default(),
            scihub: SciHubConfig::default(),
        }
    }
}

impl Config {
    /// Per-source network call timeout
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.network.source_timeout_secs)
    }

    /// Timeout for the final PDF transfer
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.network.download_timeout_secs)
    }
}

fn default_contact_email() -> String {
    std::env::var("UNPAYWALL_EMAIL").unwrap_or_else(|_| "pdf-finder@example.com".to_string())
}

/// Network settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Timeout for each source lookup, in seconds
    #[serde(default = "default_source_timeout")]
    pub source_timeout_secs: u64,

    /// Timeout for the PDF download, in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// Redirect hops allowed during the PDF download
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            source_timeout_secs: default_source_timeout(),
            download_timeout_secs: default_download_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_source_timeout() -> u64 {
    15
}

fn default_download_timeout() -> u64 {
    60
}

fn default_max_redirects() -> usize {
    10
}

/// Sci-Hub fallback settings.
///
/// The mirror lookup is legally sensitive, so it can be switched off here
/// independently of the other sources (or excluded entirely at compile
/// time by building without the `scihub` feature).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SciHubConfig {
    /// Whether the Sci-Hub fallback is used at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Mirror hostnames, tried in order
    #[serde(default = "default_mirrors")]
    pub mirrors: Vec<String>,
}

impl Default for SciHubConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            mirrors: default_mirrors(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_mirrors() -> Vec<String> {
    vec![
        "https://sci-hub.se".to_string(),
        "https://sci-hub.st".to_string(),
        "https://sci-hub.ru".to_string(),
    ]
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("PDF_FINDER").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the conventional locations:
/// `$XDG_CONFIG_HOME/pdf-finder/config.toml`, then `./pdf-finder.toml`
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("pdf-finder").join("config.toml");
        if candidate.exists() {
            return Some(candidate);
        }
    }

    let local = PathBuf::from("pdf-finder.toml");
    if local.exists() {
        return Some(local);
    }

    None
}

/// Get the effective configuration: discovered file if any, else defaults
pub fn get_config() -> Config {
    match find_config_file() {
        Some(path) => load_config(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            Config::default()
        }),
        None => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.network.source_timeout_secs, 15);
        assert_eq!(config.network.download_timeout_secs, 60);
        assert_eq!(config.network.max_redirects, 10);
        assert!(config.scihub.enabled);
        assert_eq!(config.scihub.mirrors.len(), 3);
    }

    #[test]
    fn test_partial_toml() {
        let parsed: Config = toml::from_str(
            r#"
            contact_email = "me@example.org"

            [scihub]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(parsed.contact_email, "me@example.org");
        assert!(!parsed.scihub.enabled);
        // Omitted sections fall back to defaults.
        assert_eq!(parsed.network.source_timeout_secs, 15);
        assert_eq!(parsed.scihub.mirrors.len(), 3);
    }
}
