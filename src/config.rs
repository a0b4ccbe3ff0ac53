use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::debug;

use crate::providers::exchange_rate_api;

fn default_port() -> u16 {
    5000
}

fn default_asset_version() -> String {
    "dev".to_string()
}

fn default_static_root() -> PathBuf {
    PathBuf::from("static")
}

fn default_cache_max_age() -> Option<u64> {
    Some(3600)
}

fn default_timeout_secs() -> u64 {
    exchange_rate_api::DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExchangeRateProviderConfig {
    fn default() -> Self {
        ExchangeRateProviderConfig {
            base_url: exchange_rate_api::DEFAULT_BASE_URL.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    pub exchange_rate: Option<ExchangeRateProviderConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StaticFilesConfig {
    #[serde(default = "default_static_root")]
    pub root: PathBuf,
    /// `Some(secs)` is served as `public, max-age=secs`; `None` as `no-store`.
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age: Option<u64>,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        StaticFilesConfig {
            root: default_static_root(),
            cache_max_age: default_cache_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Cache-busting token appended to static asset URLs on the entry page.
    #[serde(default = "default_asset_version")]
    pub asset_version: String,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: default_port(),
            asset_version: default_asset_version(),
            static_files: StaticFilesConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the file when a path is given, otherwise starts from defaults.
    /// `PORT` and `ASSET_VERSION` environment variables override either.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(port) = env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.port = port;
        }
        if let Ok(version) = env::var("ASSET_VERSION") {
            if !version.is_empty() {
                self.asset_version = version;
            }
        }
    }
}
