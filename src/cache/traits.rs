//! Cache store trait and error types

use indexmap::IndexMap;
use thiserror::Error;

/// Source page URL → absolute image URL, in insertion order
pub type CacheMapping = IndexMap<String, String>;

/// Errors that can occur while persisting the cache
///
/// Loading never fails; a missing or corrupt cache is treated as empty.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to create cache directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write cache file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for thumbnail cache backends
///
/// The coordinator loads the mapping once, mutates it in memory, and hands
/// it back for a single `persist` at the end of the run.
pub trait CacheStore {
    /// Reads the persisted mapping
    ///
    /// Returns an empty mapping when nothing usable is stored.
    fn load(&self) -> CacheMapping;

    /// Writes the full mapping, replacing whatever was stored before
    ///
    /// # Returns
    ///
    /// The hex-encoded SHA-256 digest of the stored representation
    fn persist(&self, mapping: &CacheMapping) -> CacheResult<String>;

    /// Looks up the image URL for a source page
    fn get<'a>(&self, mapping: &'a CacheMapping, url: &str) -> Option<&'a String> {
        mapping.get(url)
    }

    /// Stores a freshly resolved image URL
    ///
    /// Existing keys keep their position. Returns true if the stored value
    /// changed.
    fn merge(&self, mapping: &mut CacheMapping, url: &str, image_url: String) -> bool {
        match mapping.get(url) {
            Some(existing) if *existing == image_url => false,
            _ => {
                mapping.insert(url.to_string(), image_url);
                true
            }
        }
    }
}
