//! Thumbnail Resolver: preview images for a fixed product catalog
//!
//! This crate fetches each catalog page, picks a representative image out of
//! its markup, and keeps the resulting source URL → image URL mapping in a
//! JSON cache that the website reads at render time.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod output;
pub mod resolver;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for resolver operations
///
/// Only conditions that halt a whole run end up here. Per-URL fetch failures
/// are recorded in the run summary instead.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::UrlState,
        to: state::UrlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from fetching a single page
///
/// These never abort a run; the coordinator turns them into a failure record
/// for the URL that produced them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Timeout")]
    Timeout { url: String },

    #[error("HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Connection error: {message}")]
    Connection { url: String, message: String },

    #[error("Too many redirects ({hops}) starting at {url}")]
    RedirectLimit { url: String, hops: usize },

    #[error("Redirect loop detected at {url}")]
    RedirectLoop { url: String },

    #[error("Unsupported URL scheme: {scheme}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    /// The URL that was being requested when the error occurred
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Connection { url, .. }
            | Self::RedirectLimit { url, .. }
            | Self::RedirectLoop { url }
            | Self::UnsupportedScheme { url, .. }
            | Self::InvalidUrl { url, .. } => url,
        }
    }
}

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{CacheMapping, CacheStore, JsonCacheStore};
pub use config::Config;
pub use output::RunSummary;
pub use resolver::{Coordinator, Extractor, HttpFetcher, PageFetcher, ResolveMode};
pub use state::{RunResult, UrlState};
pub use url::resolve_image_url;
