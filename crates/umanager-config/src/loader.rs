//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use umanager_core::{UmanagerError, UmanagerResult};

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "UMANAGER";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `UMANAGER_` prefix (`__` separates
    ///    nested keys, e.g. `UMANAGER_STORAGE__OPERATION_TIMEOUT_MS`)
    pub fn new(config_dir: impl Into<PathBuf>) -> UmanagerResult<Self> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> UmanagerResult<Self> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// The previous configuration stays in place if the new one fails to
    /// load or validate.
    pub async fn reload(&self) -> UmanagerResult<()> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &Path) -> UmanagerResult<AppConfig> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("UMANAGER_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_umanager_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| UmanagerError::configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_dir", &self.config_dir)
            .finish_non_exhaustive()
    }
}

fn config_error_to_umanager_error(err: ConfigError) -> UmanagerError {
    UmanagerError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.operation_timeout(), Duration::from_secs(5));
        assert_eq!(config.document_store.database, "umanager");
        assert!(config.database.url.starts_with("postgres://"));
    }

    #[tokio::test]
    async fn test_empty_directory_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(dir.path()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.storage.operation_timeout_ms, 5_000);
        assert_eq!(config.app.name, "umanager");
    }

    #[tokio::test]
    async fn test_default_toml_overrides_and_reload() {
        let dir = TempDir::new().unwrap();
        let default_path = dir.path().join("default.toml");
        fs::write(
            &default_path,
            r#"
            [document_store]
            url = "mongodb://mongo.internal:27017"
            database = "links_db"

            [storage]
            operation_timeout_ms = 750
            "#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.document_store.url, "mongodb://mongo.internal:27017");
        assert_eq!(config.document_store.database, "links_db");
        assert_eq!(config.storage.operation_timeout(), Duration::from_millis(750));
        // untouched sections keep their defaults
        assert_eq!(config.database.max_connections, 10);

        fs::write(&default_path, "[storage]\noperation_timeout_ms = 1500\n").unwrap();
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.storage.operation_timeout_ms, 1500);
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[storage]\noperation_timeout_ms = 0\n",
        )
        .unwrap();

        let err = ConfigLoader::new(dir.path()).unwrap_err();
        assert!(matches!(err, UmanagerError::Configuration(_)));
        assert!(err.to_string().contains("storage.operation_timeout_ms"));
    }

    #[tokio::test]
    async fn test_env_var_overrides_file() {
        // No other test reads this key, so setting it cannot race them.
        let var = "UMANAGER_DOCUMENT_STORE__MAX_POOL_SIZE";
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[document_store]\nmax_pool_size = 20\n",
        )
        .unwrap();

        std::env::set_var(var, "42");
        let loaded = ConfigLoader::new(dir.path());
        std::env::remove_var(var);

        let config = loaded.unwrap().get().await;
        assert_eq!(config.document_store.max_pool_size, 42);
    }

    #[tokio::test]
    async fn test_reload_keeps_previous_config_on_error() {
        let dir = TempDir::new().unwrap();
        let default_path = dir.path().join("default.toml");
        fs::write(&default_path, "[storage]\noperation_timeout_ms = 900\n").unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        fs::write(&default_path, "[storage]\noperation_timeout_ms = 0\n").unwrap();

        assert!(loader.reload().await.is_err());
        assert_eq!(loader.get().await.storage.operation_timeout_ms, 900);
    }
}
