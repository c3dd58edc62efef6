//! JSON file backend for the thumbnail cache

use crate::cache::{CacheError, CacheMapping, CacheResult, CacheStore};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Thumbnail cache stored as a pretty-printed JSON object
///
/// This file is the only contract with the website, which loads it wholesale
/// and looks up thumbnails by exact source URL.
#[derive(Debug, Clone)]
pub struct JsonCacheStore {
    path: PathBuf,
}

impl JsonCacheStore {
    /// Creates a store backed by the file at `path`
    ///
    /// Nothing is read or created until `load` or `persist` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes a mapping exactly as `persist` writes it
    pub fn render(mapping: &CacheMapping) -> CacheResult<String> {
        Ok(serde_json::to_string_pretty(mapping)?)
    }
}

impl CacheStore for JsonCacheStore {
    fn load(&self) -> CacheMapping {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cache at {}, starting empty", self.path.display());
                return CacheMapping::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read cache {}: {}; starting fresh",
                    self.path.display(),
                    e
                );
                return CacheMapping::new();
            }
        };

        let object = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                tracing::warn!(
                    "Cache {} is not a JSON object; starting fresh",
                    self.path.display()
                );
                return CacheMapping::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse cache {}: {}; starting fresh",
                    self.path.display(),
                    e
                );
                return CacheMapping::new();
            }
        };

        let mut mapping = CacheMapping::with_capacity(object.len());
        for (url, value) in object {
            match value {
                Value::String(image_url) => {
                    mapping.insert(url, image_url);
                }
                other => {
                    tracing::warn!("Skipping cache entry {}: not a string ({})", url, other);
                }
            }
        }

        tracing::info!("Loaded {} cached thumbnails", mapping.len());
        mapping
    }

    fn persist(&self, mapping: &CacheMapping) -> CacheResult<String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let rendered = Self::render(mapping)?;
        fs::write(&self.path, rendered.as_bytes()).map_err(|source| CacheError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        let digest = hex::encode(Sha256::digest(rendered.as_bytes()));
        tracing::debug!(
            "Wrote {} entries to {} (sha256 {})",
            mapping.len(),
            self.path.display(),
            digest
        );
        Ok(digest)
    }
}
