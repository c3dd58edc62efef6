//! HTTP fetcher implementation
//!
//! This module handles every page request the resolver makes, including:
//! - Building an HTTP client that presents a desktop browser identity
//! - Following redirects with a hop limit and loop detection
//! - Enforcing a per-page timeout across the whole redirect chain
//! - Classifying failures into [`FetchError`] variants

use crate::config::Config;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{redirect::Policy, Client};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Source of page markup
///
/// The coordinator only talks to pages through this trait, so runs can be
/// driven without a network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the markup of the page at `url`
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with the configured identity headers
///
/// Redirects are disabled on the client; [`HttpFetcher`] follows them itself
/// so it can bound the chain and spot loops.
///
/// # Example
///
/// ```no_run
/// use thumbnail_resolver::config::Config;
/// use thumbnail_resolver::resolver::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> crate::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_str(&config.user_agent.accept)?,
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.user_agent.accept_language)?,
    );

    let client = Client::builder()
        .user_agent(config.user_agent.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.resolver.timeout())
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Page fetcher backed by reqwest
///
/// # Request Flow
///
/// 1. Reject anything that is not an `http` or `https` URL
/// 2. Send a GET request
/// 3. On a 3xx with a `Location` header, resolve the location against the
///    current URL and request it (max `max_redirects` hops, each URL at most
///    once)
/// 4. Return the body of the first 2xx response
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Body text |
/// | 3xx without `Location`, 4xx, 5xx | `Status` |
/// | Chain longer than `max_redirects` | `RedirectLimit` |
/// | Location already visited | `RedirectLoop` |
/// | Total time over `timeout` | `Timeout` |
/// | Connection refused, DNS, TLS, body read | `Connection` |
///
/// There are no retries; one failure is final for the run.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    max_redirects: usize,
}

impl HttpFetcher {
    /// Creates a fetcher from the resolver configuration
    pub fn new(config: &Config) -> crate::Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            timeout: config.resolver.timeout(),
            max_redirects: config.resolver.max_redirects,
        })
    }

    /// Follows the redirect chain starting at `url` and returns the final body
    async fn follow(&self, url: &str) -> Result<String, FetchError> {
        let mut current = parse_http_url(url)?;
        let mut visited = HashSet::new();
        visited.insert(current.to_string());
        let mut hops = 0;

        loop {
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(|e| classify_error(current.as_str(), e))?;

            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(header::LOCATION)
                    .and_then(|v| v.to_str().ok());

                if let Some(location) = location {
                    let next = current.join(location).map_err(|e| FetchError::InvalidUrl {
                        url: location.to_string(),
                        message: e.to_string(),
                    })?;
                    check_scheme(&next)?;

                    hops += 1;
                    if hops > self.max_redirects {
                        return Err(FetchError::RedirectLimit {
                            url: url.to_string(),
                            hops: self.max_redirects,
                        });
                    }

                    if !visited.insert(next.to_string()) {
                        return Err(FetchError::RedirectLoop {
                            url: next.to_string(),
                        });
                    }

                    tracing::debug!(
                        "Redirect {} -> {} (HTTP {})",
                        current,
                        next,
                        status.as_u16()
                    );
                    current = next;
                    continue;
                }
            }

            if !status.is_success() {
                return Err(FetchError::Status {
                    url: current.to_string(),
                    status: status.as_u16(),
                });
            }

            return response
                .text()
                .await
                .map_err(|e| classify_error(current.as_str(), e));
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        // Covers the whole chain; dropping the future aborts the request
        match tokio::time::timeout(self.timeout, self.follow(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }
}

/// Parses a URL and checks that it can be fetched over HTTP(S)
fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    check_scheme(&parsed)?;
    Ok(parsed)
}

fn check_scheme(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(FetchError::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connection {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Connection {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
