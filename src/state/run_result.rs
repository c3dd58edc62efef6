/// Outcome of one resolution attempt for a catalog URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Skipped; the cache already held this image URL
    Cached(String),

    /// Fetched and resolved to this image URL
    Resolved(String),

    /// Fetched, but the markup contained no usable image
    NotFound,

    /// The fetch failed for the given reason
    FetchError(String),
}

/// A catalog URL paired with its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOutcome {
    pub url: String,
    pub result: RunResult,
}
