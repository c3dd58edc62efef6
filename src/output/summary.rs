//! Run summary built from per-URL outcomes

use crate::state::{RunResult, UrlOutcome};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;

/// A catalog URL whose page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUrl {
    /// The source page URL
    pub url: String,

    /// Human-readable failure reason ("Timeout", "HTTP 404", ...)
    pub reason: String,
}

/// Summary statistics for one resolver run
#[derive(Debug, Clone)]
pub struct RunSummary {
    // Run metadata
    pub refresh: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration: Duration,

    // Per-URL counts
    pub total: usize,
    pub cached: usize,
    pub newly_resolved: usize,

    /// Pages fetched without finding an image
    pub not_found: Vec<String>,

    /// Pages that could not be fetched
    pub errors: Vec<FailedUrl>,

    // Cache after the run
    pub cache_size: usize,
    pub cache_digest: String,
}

impl RunSummary {
    /// Builds a summary from the outcomes of a run
    ///
    /// Not-found pages and fetch failures are kept apart: only the latter
    /// carry a failure reason.
    pub fn from_outcomes(
        outcomes: &[UrlOutcome],
        refresh: bool,
        cache_size: usize,
        cache_digest: String,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        let mut summary = Self {
            refresh,
            started_at,
            finished_at,
            duration,
            total: outcomes.len(),
            cached: 0,
            newly_resolved: 0,
            not_found: Vec::new(),
            errors: Vec::new(),
            cache_size,
            cache_digest,
        };

        for outcome in outcomes {
            match &outcome.result {
                RunResult::Cached(_) => summary.cached += 1,
                RunResult::Resolved(_) => summary.newly_resolved += 1,
                RunResult::NotFound => summary.not_found.push(outcome.url.clone()),
                RunResult::FetchError(reason) => summary.errors.push(FailedUrl {
                    url: outcome.url.clone(),
                    reason: reason.clone(),
                }),
            }
        }

        summary
    }

    /// Number of pages that were requested this run
    pub fn fetched(&self) -> usize {
        self.total - self.cached
    }

    /// Returns true if every URL ended with an image
    pub fn is_complete(&self) -> bool {
        self.not_found.is_empty() && self.errors.is_empty()
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary, cache_path: &Path) {
    println!("\n=== Summary ===");
    println!(
        "Mode: {}",
        if summary.refresh {
            "REFRESH (re-fetching all)"
        } else {
            "INCREMENTAL (only new/missing)"
        }
    );
    println!("Total products: {}", summary.total);
    println!("Skipped (cached): {}", summary.cached);
    println!("Fetched: {}", summary.fetched());
    println!("Cached: {}", summary.cache_size);
    println!("Newly resolved: {}", summary.newly_resolved);
    println!("Not found: {}", summary.not_found.len());
    println!("Errors: {}", summary.errors.len());
    println!("Duration: {:.1}s", summary.duration.as_secs_f64());

    if !summary.not_found.is_empty() {
        println!("\nNo image found:");
        for url in &summary.not_found {
            println!("  - {}", url);
        }
    }

    if !summary.errors.is_empty() {
        println!("\nErrors:");
        for failed in &summary.errors {
            println!("  - {}: {}", failed.url, failed.reason);
        }
    }

    println!("\nCache saved to: {}", cache_path.display());
    println!("Cache digest: sha256:{}", summary.cache_digest);
}
