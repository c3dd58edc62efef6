/// Per-URL state definitions for tracking resolution progress
///
/// Each catalog URL walks through these states exactly once per run.
use std::fmt;

/// Represents the current state of a catalog URL in a resolver run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    // ===== Active States =====
    /// URL has not been looked at yet
    Pending,

    /// Page is being downloaded
    Fetching,

    /// Page markup is being searched for an image
    Extracting,

    // ===== Terminal Success States =====
    /// Cache already held an entry and the run is incremental
    SkipCached,

    /// A fresh image URL was found and stored
    Resolved,

    // ===== Terminal Miss States =====
    /// Page was fetched but no strategy produced an image
    NotFound,

    // ===== Terminal Error States =====
    /// Page could not be fetched (timeout, HTTP status, connection, redirects)
    FetchFailed,
}

impl UrlState {
    /// Returns true if moving from this state to `next` is allowed
    ///
    /// ```text
    /// Pending ─┬─> SkipCached
    ///          └─> Fetching ─┬─> Extracting ─┬─> Resolved
    ///                        │               └─> NotFound
    ///                        └─> FetchFailed
    /// ```
    pub fn can_transition_to(&self, next: UrlState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::SkipCached)
                | (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::FetchFailed)
                | (Self::Extracting, Self::Resolved)
                | (Self::Extracting, Self::NotFound)
        )
    }

    /// Console tag used in progress lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Fetching => "FETCHING",
            Self::Extracting => "EXTRACTING",
            Self::SkipCached => "CACHED",
            Self::Resolved => "FOUND",
            Self::NotFound => "NOT FOUND",
            Self::FetchFailed => "ERROR",
        }
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
