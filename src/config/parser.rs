use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Keys missing from the file keep their compiled-in defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use thumbnail_resolver::config::load_config;
///
/// let config = load_config(Path::new("resolver.toml")).unwrap();
/// println!("Timeout: {}s", config.resolver.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the configuration file if one was given, defaults otherwise
pub fn load_config_or_default(path: Option<&Path>) -> ConfigResult<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[resolver]
timeout-secs = 20
request-delay-ms = 250
max-redirects = 5

[user-agent]
user-agent = "TestBrowser/1.0"
accept = "text/html"
accept-language = "nl"

[output]
cache-path = "./out/thumbs.json"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.resolver.timeout_secs, 20);
        assert_eq!(config.resolver.request_delay_ms, 250);
        assert_eq!(config.resolver.max_redirects, 5);
        assert_eq!(config.user_agent.user_agent, "TestBrowser/1.0");
        assert_eq!(config.output.cache_path, PathBuf::from("./out/thumbs.json"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = create_temp_config("[resolver]\nrequest-delay-ms = 0\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.resolver.request_delay_ms, 0);
        assert_eq!(config.resolver.timeout_secs, 15);
        assert_eq!(config.resolver.max_redirects, 10);
        assert!(config.user_agent.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(
            config.output.cache_path,
            PathBuf::from("data").join("thumbnails.json")
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.resolver.timeout_secs, 15);
        assert_eq!(config.resolver.request_delay_ms, 500);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/resolver.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[resolver]\ntimeout-secs = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_or_default_without_path() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.resolver.max_redirects, 10);
    }
}
