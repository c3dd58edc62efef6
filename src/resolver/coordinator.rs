//! Resolver coordinator - main run orchestration logic
//!
//! This module contains the run loop that ties the pieces together:
//! - Loading the cache once at the start of a run
//! - Deciding per URL whether to fetch or reuse the cached image
//! - Pacing, fetching, and extracting, strictly in catalog order
//! - Merging fresh results without ever dropping known-good entries
//! - Persisting once and summarizing

use crate::cache::{CacheMapping, CacheStore, JsonCacheStore};
use crate::config::Config;
use crate::output::RunSummary;
use crate::resolver::extractor::Extractor;
use crate::resolver::fetcher::{HttpFetcher, PageFetcher};
use crate::resolver::scheduler::RequestPacer;
use crate::state::{RunResult, UrlOutcome, UrlState};
use crate::ResolverError;
use chrono::Utc;
use std::time::{Duration, Instant};
use url::Url;

/// Environment variable that switches a run to refresh mode
pub const REFRESH_ENV_VAR: &str = "REFRESH_THUMBNAILS";

/// Whether cached URLs are fetched again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Only fetch URLs that have no cache entry
    #[default]
    Incremental,

    /// Fetch every URL, cached or not
    Refresh,
}

impl ResolveMode {
    /// Maps a boolean refresh flag to a mode
    pub fn from_flag(refresh: bool) -> Self {
        if refresh {
            Self::Refresh
        } else {
            Self::Incremental
        }
    }

    /// Reads the mode from `REFRESH_THUMBNAILS` (`true` selects refresh)
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(REFRESH_ENV_VAR).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        Self::from_flag(value == Some("true"))
    }

    pub fn is_refresh(&self) -> bool {
        matches!(self, Self::Refresh)
    }
}

/// Main resolver coordinator structure
pub struct Coordinator<F, S> {
    fetcher: F,
    store: S,
    extractor: Extractor,
    pacer: RequestPacer,
    mode: ResolveMode,
}

impl Coordinator<HttpFetcher, JsonCacheStore> {
    /// Creates a coordinator that fetches over HTTP and caches to the
    /// configured JSON file
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ResolverError)` - The HTTP client could not be built
    pub fn from_config(config: &Config, mode: ResolveMode) -> crate::Result<Self> {
        Ok(Self::new(
            HttpFetcher::new(config)?,
            JsonCacheStore::new(&config.output.cache_path),
            Extractor::default(),
            config.resolver.request_delay(),
            mode,
        ))
    }
}

impl<F: PageFetcher, S: CacheStore> Coordinator<F, S> {
    /// Creates a new coordinator from its parts
    pub fn new(
        fetcher: F,
        store: S,
        extractor: Extractor,
        request_delay: Duration,
        mode: ResolveMode,
    ) -> Self {
        Self {
            fetcher,
            store,
            extractor,
            pacer: RequestPacer::new(request_delay),
            mode,
        }
    }

    /// The cache store this coordinator persists to
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the resolver over `urls`
    ///
    /// 1. Load the cache (absent or corrupt → empty)
    /// 2. Resolve every URL in order, never aborting on a per-URL failure
    /// 3. Persist the cache exactly once
    /// 4. Summarize
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - The run completed, possibly with per-URL failures
    /// * `Err(ResolverError)` - The cache could not be written
    pub async fn run(&mut self, urls: &[String]) -> crate::Result<RunSummary> {
        let started_at = Utc::now();
        let start_time = Instant::now();

        tracing::info!(
            "Mode: {}",
            if self.mode.is_refresh() {
                "REFRESH (re-fetching all)"
            } else {
                "INCREMENTAL (only new/missing)"
            }
        );
        tracing::info!("Products to process: {}", urls.len());
        tracing::debug!(
            "Extraction strategies: {}",
            self.extractor.strategy_names().join(" > ")
        );

        let mapping = self.store.load();
        let (mapping, outcomes) = self.resolve_batch(mapping, urls).await;

        let digest = self.store.persist(&mapping)?;

        let summary = RunSummary::from_outcomes(
            &outcomes,
            self.mode.is_refresh(),
            mapping.len(),
            digest,
            started_at,
            Utc::now(),
            start_time.elapsed(),
        );

        tracing::info!(
            "Run completed: {} resolved, {} not found, {} errors in {:?}",
            summary.newly_resolved,
            summary.not_found.len(),
            summary.errors.len(),
            summary.duration
        );

        Ok(summary)
    }

    /// Resolves every URL against `mapping` and returns the updated mapping
    ///
    /// Fresh images overwrite their entry as soon as they are found. Misses
    /// and failures leave the mapping untouched.
    pub async fn resolve_batch(
        &mut self,
        mut mapping: CacheMapping,
        urls: &[String],
    ) -> (CacheMapping, Vec<UrlOutcome>) {
        let mut outcomes = Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            tracing::info!("[{}/{}]", index + 1, urls.len());

            let result = match self.process_url(&mut mapping, url).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Error processing {}: {}", url, e);
                    RunResult::FetchError(e.to_string())
                }
            };

            outcomes.push(UrlOutcome {
                url: url.clone(),
                result,
            });
        }

        (mapping, outcomes)
    }

    /// Processes a single URL
    ///
    /// ```text
    /// Pending ─┬─> SkipCached                      (incremental + cached)
    ///          └─> Fetching ─┬─> Extracting ─┬─> Resolved   (entry written)
    ///                        │               └─> NotFound
    ///                        └─> FetchFailed
    /// ```
    async fn process_url(
        &mut self,
        mapping: &mut CacheMapping,
        url: &str,
    ) -> crate::Result<RunResult> {
        let mut state = UrlState::Pending;

        if self.mode == ResolveMode::Incremental {
            if let Some(image_url) = self.store.get(mapping, url) {
                advance(&mut state, UrlState::SkipCached)?;
                tracing::info!("  [{}] {}", state, url);
                return Ok(RunResult::Cached(image_url.clone()));
            }
        }

        advance(&mut state, UrlState::Fetching)?;

        let base_url = match Url::parse(url) {
            Ok(base_url) => base_url,
            Err(e) => {
                advance(&mut state, UrlState::FetchFailed)?;
                tracing::warn!("  [{}] Invalid URL {}: {}", state, url, e);
                return Ok(RunResult::FetchError(format!("Invalid URL: {}", e)));
            }
        };

        self.pacer.wait_turn().await;
        tracing::info!("  [{}] {}", state, url);

        let markup = match self.fetcher.fetch(url).await {
            Ok(markup) => markup,
            Err(e) => {
                advance(&mut state, UrlState::FetchFailed)?;
                // The failing URL can be a redirect target, not the catalog URL
                tracing::warn!("  [{}] {} ({})", state, e, e.url());
                return Ok(RunResult::FetchError(e.to_string()));
            }
        };

        advance(&mut state, UrlState::Extracting)?;

        match self.extractor.extract_with_source(&markup, &base_url) {
            Some(found) => {
                advance(&mut state, UrlState::Resolved)?;
                tracing::info!("  [{}] {}", state, found.image_url);
                tracing::debug!("  matched by {} strategy", found.strategy);

                if self.store.merge(mapping, url, found.image_url.clone()) {
                    tracing::debug!("  cache entry updated for {}", url);
                }
                Ok(RunResult::Resolved(found.image_url))
            }
            None => {
                advance(&mut state, UrlState::NotFound)?;
                tracing::info!("  [{}] No image extracted", state);
                Ok(RunResult::NotFound)
            }
        }
    }
}

/// Moves a URL to its next state, rejecting transitions the lifecycle
/// does not allow
fn advance(state: &mut UrlState, next: UrlState) -> crate::Result<()> {
    if !state.can_transition_to(next) {
        return Err(ResolverError::InvalidTransition {
            from: *state,
            to: next,
        });
    }
    *state = next;
    Ok(())
}

/// Runs the resolver over `urls` with a configuration and mode
///
/// # Example
///
/// ```no_run
/// use thumbnail_resolver::catalog::product_urls;
/// use thumbnail_resolver::config::Config;
/// use thumbnail_resolver::resolver::{run_resolver, ResolveMode};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_resolver(&Config::default(), ResolveMode::from_env(), &product_urls()).await?;
/// println!("{} newly resolved", summary.newly_resolved);
/// # Ok(())
/// # }
/// ```
pub async fn run_resolver(
    config: &Config,
    mode: ResolveMode,
    urls: &[String],
) -> crate::Result<RunSummary> {
    let mut coordinator = Coordinator::from_config(config, mode)?;
    coordinator.run(urls).await
}
