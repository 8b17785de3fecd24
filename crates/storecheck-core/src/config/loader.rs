use super::schema::StorecheckConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_BASE_URL: &str = "STORECHECK_BASE_URL";
pub const ENV_PASSWORD: &str = "STORECHECK_PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid base URL {url}: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations, then apply environment overrides:
    /// 1. ./storecheck.yaml
    /// 2. ~/.storecheck/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<StorecheckConfig, ConfigError> {
        let mut config = Self::load_file_default().await?;
        Self::apply_env(&mut config, |key| std::env::var(key).ok());
        Self::validate(&config)?;
        Ok(config)
    }

    async fn load_file_default() -> Result<StorecheckConfig, ConfigError> {
        let local_config = PathBuf::from("./storecheck.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".storecheck").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(StorecheckConfig::default())
    }

    /// Load a specific file. An empty file yields the defaults.
    pub async fn load_from(path: &Path) -> Result<StorecheckConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(StorecheckConfig::default());
        }
        let config: StorecheckConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values from the environment. `lookup` is injected so tests do
    /// not have to mutate the process environment.
    pub fn apply_env<F>(config: &mut StorecheckConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.store.base_url = url.trim().to_string();
        }
        if let Some(password) = lookup(ENV_PASSWORD).filter(|v| !v.is_empty()) {
            config.store.password = Some(password);
        }
    }

    pub fn validate(config: &StorecheckConfig) -> Result<(), ConfigError> {
        url::Url::parse(&config.store.base_url).map_err(|source| ConfigError::BaseUrl {
            url: config.store.base_url.clone(),
            source,
        })?;
        Ok(())
    }
}
