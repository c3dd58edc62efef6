//! Thumbnail cache persistence
//!
//! This module handles the on-disk mapping from product page URLs to
//! resolved image URLs:
//! - Loading the previous run's mapping (absent or corrupt → empty)
//! - Lookup and overwrite-on-success merging
//! - Writing the full mapping back as pretty-printed JSON

mod json_store;
mod traits;

pub use json_store::JsonCacheStore;
pub use traits::{CacheError, CacheMapping, CacheResult, CacheStore};

use std::collections::HashSet;

/// Coverage of a cache against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheCoverage {
    /// Entries in the cache
    pub entries: usize,

    /// Catalog URLs that have an entry
    pub covered: usize,

    /// Catalog URLs without an entry, in catalog order
    pub missing: Vec<String>,

    /// Cached source URLs that are no longer in the catalog
    pub orphaned: Vec<String>,
}

/// Compares a cache mapping with the catalog
pub fn coverage(mapping: &CacheMapping, catalog: &[String]) -> CacheCoverage {
    let catalog_set: HashSet<&str> = catalog.iter().map(String::as_str).collect();

    let missing: Vec<String> = catalog
        .iter()
        .filter(|url| !mapping.contains_key(url.as_str()))
        .cloned()
        .collect();

    let orphaned = mapping
        .keys()
        .filter(|url| !catalog_set.contains(url.as_str()))
        .cloned()
        .collect();

    CacheCoverage {
        entries: mapping.len(),
        covered: catalog.len() - missing.len(),
        missing,
        orphaned,
    }
}
