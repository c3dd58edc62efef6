//! State module for tracking resolver progress
//!
//! # Components
//!
//! - `UrlState`: where a catalog URL is in its fetch/extract lifecycle
//! - `RunResult`: the outcome a URL ends the run with

mod run_result;
mod url_state;

// Re-export main types
pub use run_result::{RunResult, UrlOutcome};
pub use url_state::UrlState;
