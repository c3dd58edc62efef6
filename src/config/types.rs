use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the thumbnail resolver
///
/// Every section has compiled-in defaults, so an empty TOML file (or no file
/// at all) yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch and pacing behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Time allowed for one page fetch, redirects included (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Delay imposed between consecutive fetch attempts (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Maximum number of redirect hops followed for a single page
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            request_delay_ms: 500,
            max_redirects: 10,
        }
    }
}

/// Request identity headers
///
/// Product pages serve a degraded page (or nothing) to obvious scripts, so
/// the defaults mimic a desktop browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9,nl;q=0.8".to_string(),
        }
    }
}

/// Output file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON thumbnail cache
    #[serde(rename = "cache-path")]
    pub cache_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("data").join("thumbnails.json"),
        }
    }
}
