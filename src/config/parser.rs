use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML; missing sections and keys fall back to the built-in defaults
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
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
[crawl]
seed-url = "https://forum.example.com/search/?q=tesla"
max-pages = 12
max-concurrent-fetches = 3
retry-limit = 5
backoff-base-ms = 1000

[output]
csv-path = "./out.csv"

[identity]
user-agents = ["TestAgent/1.0"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.seed_url, "https://forum.example.com/search/?q=tesla");
        assert_eq!(config.crawl.max_pages, 12);
        assert_eq!(config.crawl.max_concurrent_fetches, 3);
        assert_eq!(config.output.csv_path, "./out.csv");
        assert_eq!(config.identity.user_agents.len(), 1);
    }

    #[test]
    fn test_load_config_fills_defaults() {
        // Only one section present; everything else comes from Default
        let config_content = r#"
[output]
csv-path = "./elsewhere.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.output.csv_path, "./elsewhere.csv");
        assert_eq!(config.crawl.max_pages, 176);
        assert_eq!(config.crawl.max_concurrent_fetches, 5);
        assert_eq!(config.identity.user_agents.len(), 4);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawl]
max-concurrent-fetches = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
