//! Output module for run summaries and cache reports
//!
//! This module handles:
//! - Building the end-of-run summary from per-URL outcomes
//! - Printing the summary block
//! - Reporting cache coverage against the catalog

pub mod stats;
mod summary;

pub use stats::{load_statistics, print_statistics};
pub use summary::{print_summary, FailedUrl, RunSummary};
