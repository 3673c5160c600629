//! Layered CLI configuration
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `rxboard.toml` in the working directory (or the `--config` path)
//! 3. `RXBOARD__SECTION__KEY` environment variables, e.g.
//!    `RXBOARD__CACHE__MAX_ENTRIES=1024`
//! 4. `RXBOARD_API_BASE_URL`
//!
//! `.env` is loaded into the environment before any of this runs.

use std::path::Path;

use anyhow::{bail, Context};
use config::{Environment, File};
use rxboard_client::{ApiConfig, CacheConfig, BASE_URL_ENV};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "rxboard.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the `rxboard` crates when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load from the process environment and an optional config file
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(BASE_URL_ENV).ok();
        Self::load_from(path, base_url)
    }

    fn load_from(path: Option<&Path>, base_url: Option<String>) -> anyhow::Result<Self> {
        let file = match path {
            // An explicit path must exist
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut config: Config = config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("RXBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            config.api.base_url = base_url;
        }

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            bail!("api.base_url must be an http(s) URL, got {}", self.api.base_url);
        }
        if self.api.timeout_seconds == 0 {
            bail!("api.timeout_seconds must be at least 1");
        }
        if self.cache.max_entries == 0 {
            bail!("cache.max_entries must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rxboard-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_toml(
            "file-overrides",
            r#"
[api]
base_url = "http://pbm.internal:8080"

[cache]
max_entries = 64
"#,
        );

        let config = Config::load_from(Some(&path), None).unwrap();
        assert_eq!(config.api.base_url, "http://pbm.internal:8080");
        // Unset keys keep their defaults
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.cache.max_entries, 64);
        assert_eq!(config.cache.stale_after_seconds, 60);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_base_url_variable_wins() {
        let path = write_toml("env-wins", "[api]\nbase_url = \"http://from-file:1\"\n");

        let config =
            Config::load_from(Some(&path), Some("https://from-env.example".to_string())).unwrap();
        assert_eq!(config.api.base_url, "https://from-env.example");

        // Blank values are ignored
        let config = Config::load_from(Some(&path), Some("  ".to_string())).unwrap();
        assert_eq!(config.api.base_url, "http://from-file:1");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("rxboard-does-not-exist.toml");
        assert!(Config::load_from(Some(&path), None).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.base_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cache.max_entries = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }
}
