use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default nearby-search endpoint (Google Places).
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Default request timeout for a single place lookup.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration for a scan.
///
/// Built once at startup (config file, then CLI overrides) and passed by
/// reference into the [`Pipeline`](crate::pipeline::Pipeline) and the
/// place lookup client. Nothing in the library reads process-wide state.
///
/// # Loading
///
/// ```rust,no_run
/// use photo_places::config::Config;
///
/// // From a JSON file
/// let mut config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // CLI flags win over the file
/// config.places.api_key = "AIza...".into();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Place search service settings.
    #[serde(default)]
    pub places: PlacesConfig,
    /// What to scan.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Nearby place search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Root directory to walk.
    pub directory: PathBuf,
}

/// Reasons a [`Config`] cannot start a run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key is mandatory (use --key or PLACES_API_KEY)")]
    MissingApiKey,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/"),
        }
    }
}

impl Config {
    /// Resolve the config file path: `config.json` next to the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Check that the config can start a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.places.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.places.timeout_secs)
    }
}
