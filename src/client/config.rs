use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://localhost:5000/api";

/// Base URL override
pub const API_URL_ENV: &str = "RESCUEDESK_API_URL";
/// Session storage directory override
pub const STORAGE_DIR_ENV: &str = "RESCUEDESK_STORAGE_DIR";
/// Optional TOML configuration file
pub const CONFIG_FILE_ENV: &str = "RESCUEDESK_CONFIG";

/// The base URL override, read once per process.
fn env_server_url() -> Option<&'static str> {
    static SERVER_URL: OnceLock<Option<String>> = OnceLock::new();
    SERVER_URL
        .get_or_init(|| std::env::var(API_URL_ENV).ok().filter(|url| !url.trim().is_empty()))
        .as_deref()
}

/// Application configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        let app = match env_server_url() {
            Some(url) => AppConfig::builder().server_url(url).build().unwrap_or_else(|e| {
                tracing::warn!("[CONFIG] Ignoring {}: {}", API_URL_ENV, e);
                AppConfig::default()
            }),
            None => AppConfig::default(),
        };
        Self { app }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Configuration pointing at `server_url`, everything else default
    pub fn for_server(server_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_builder(AppConfig::builder().server_url(server_url))
    }

    /// Load the configuration file named by `RESCUEDESK_CONFIG` (if any), then
    /// apply environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = match std::env::var_os(CONFIG_FILE_ENV) {
            Some(path) => AppConfig::load(&PathBuf::from(path))?,
            None => AppConfig::default(),
        };

        let mut builder = AppConfigBuilder::from_config(file);
        if let Some(url) = env_server_url() {
            builder = builder.server_url(url);
        }
        if let Some(dir) = std::env::var_os(STORAGE_DIR_ENV) {
            builder = builder.storage_path(dir);
        }
        Self::with_builder(builder)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.server_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Directory holding the persisted session
    pub fn storage_path(&self) -> PathBuf {
        self.app.storage_path.clone().unwrap_or_else(Self::default_storage_path)
    }

    /// Per-request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.app.request_timeout_secs.map(Duration::from_secs)
    }

    fn default_storage_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("rescuedesk")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_for_server() {
        let config = Config::for_server("http://127.0.0.1:4000/api/").unwrap();
        assert_eq!(config.server_url(), "http://127.0.0.1:4000/api/");
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_api_url_joins_slashes() {
        let config = Config::for_server("http://127.0.0.1:4000/api/").unwrap();
        assert_eq!(config.api_url("/dogs"), "http://127.0.0.1:4000/api/dogs");
        assert_eq!(config.api_url("dogs/3"), "http://127.0.0.1:4000/api/dogs/3");
    }

    #[test]
    fn test_default_storage_path_ends_with_app_dir() {
        let config = Config::for_server("http://127.0.0.1:4000").unwrap();
        assert!(config.storage_path().ends_with("rescuedesk"));
    }

    #[test]
    fn test_with_builder_timeout_and_storage() {
        let config = Config::with_builder(
            AppConfig::builder()
                .server_url("https://rescue.example.org/api")
                .storage_path("/tmp/rescuedesk-test")
                .request_timeout_secs(5),
        )
        .unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/rescuedesk-test"));
    }

    #[test]
    fn test_invalid_server_url() {
        assert!(matches!(
            Config::for_server("localhost:5000"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_config_file_and_storage_override() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rescuedesk.toml");
        std::fs::write(&file, "request_timeout_secs = 30\nstorage_path = \"/from/file\"\n").unwrap();

        std::env::set_var(CONFIG_FILE_ENV, &file);
        std::env::set_var(STORAGE_DIR_ENV, dir.path());
        let config = Config::from_env();
        std::env::remove_var(CONFIG_FILE_ENV);
        std::env::remove_var(STORAGE_DIR_ENV);

        let config = config.unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.storage_path(), dir.path());
    }

    #[test]
    #[serial]
    fn test_from_env_missing_config_file() {
        std::env::set_var(CONFIG_FILE_ENV, "/definitely/not/here.toml");
        let result = Config::from_env();
        std::env::remove_var(CONFIG_FILE_ENV);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
