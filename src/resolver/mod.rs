//! Resolver module for thumbnail discovery
//!
//! This module contains the core resolving logic, including:
//! - HTTP fetching with manual, bounded redirect handling
//! - Image extraction from page markup via an ordered strategy chain
//! - Request pacing between fetches
//! - Overall run coordination against the cache

mod coordinator;
mod extractor;
mod fetcher;
mod scheduler;

pub use coordinator::{run_resolver, Coordinator, ResolveMode, REFRESH_ENV_VAR};
pub use extractor::{
    Extraction, ExtractionStrategy, Extractor, JsonLdStrategy, LargestImageStrategy,
    MetaImageStrategy,
};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use scheduler::RequestPacer;
