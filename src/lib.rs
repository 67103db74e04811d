//! # PDF Finder
//!
//! Locates and downloads PDFs of scientific papers. Given any subset of
//! {DOI, landing-page URL, title} for a work, a fixed priority chain of
//! external sources is tried strictly in order — Unpaywall, the landing
//! page itself, CrossRef, arXiv, and finally Sci-Hub — stopping at the
//! first one that yields a direct PDF URL.
//!
//! ## Architecture
//!
//! - [`models`]: Request and result types ([`ResolutionRequest`], [`models::ResolutionResult`])
//! - [`sources`]: Acquisition source plugins behind the [`sources::PdfSource`] trait
//! - [`resolver`]: The ordered trial loop and the final download step
//! - [`utils`]: HTTP client, HTML extraction helpers, validation
//! - [`config`]: Configuration management
//!
//! ## Example
//!
//! ```rust,no_run
//! use pdf_finder::config::Config;
//! use pdf_finder::models::ResolutionRequest;
//! use pdf_finder::resolver::Resolver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = Resolver::from_config(&Config::default())?;
//! let request = ResolutionRequest::new().doi("10.1038/nature12345");
//!
//! let result = resolver.resolve(&request).await;
//! if let Some(pdf_url) = &result.pdf_url {
//!     let document = resolver.download(pdf_url).await?;
//!     std::fs::write("paper.pdf", &document.bytes)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod resolver;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{ResolutionRequest, ResolutionResult};
pub use resolver::{DownloadError, Resolver};
pub use sources::{PdfSource, SourceChain};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
