//! Configuration module for the thumbnail resolver
//!
//! Resolver settings have compiled-in defaults and can be overridden from an
//! optional TOML file. The product catalog itself is not configurable; see
//! [`crate::catalog`].
//!
//! # Example
//!
//! ```no_run
//! use thumbnail_resolver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("resolver.toml")).unwrap();
//! println!("Cache file: {}", config.output.cache_path.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ResolverConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
