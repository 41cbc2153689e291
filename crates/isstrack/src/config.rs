//! Configuration management for isstrack.
//!
//! This module provides configuration loading and validation using figment,
//! supporting a TOML config file, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "isstrack";

/// Prefix for generic environment overrides.
const ENV_PREFIX: &str = "ISSTRACK_";

/// Environment variable overriding the database name.
pub const DB_NAME_ENV: &str = "MONGO_DB_NAME";

/// Default upstream endpoint.
pub const DEFAULT_API_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. `MONGO_DB_NAME` for the database name
/// 2. Environment variables prefixed with `ISSTRACK_` (`__` separates sections)
/// 3. TOML config file at `~/.config/isstrack/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream fetch configuration.
    pub locator: LocatorConfig,
    /// Document store configuration.
    pub recorder: RecorderConfig,
}

/// Upstream fetch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Endpoint returning the current ISS position.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// IANA zone used to format `fetched_at`.
    /// Defaults to the process-local zone.
    pub timezone: Option<Tz>,
}

/// Document store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Connection string scheme, `mongodb+srv` or `mongodb`.
    pub scheme: String,
    /// Database user.
    pub user: String,
    /// Cluster host alias.
    pub host: String,
    /// Database name.
    pub database: String,
    /// Collection receiving the readings.
    pub collection: String,
    /// Server selection timeout in seconds.
    pub server_selection_timeout_secs: u64,
    /// Name of the environment variable holding the password.
    pub password_env: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
            timezone: None,
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            scheme: "mongodb+srv".to_string(),
            user: "docker".to_string(),
            host: "cluster0.m3fek.mongodb.net".to_string(),
            database: "pxr6gr".to_string(),
            collection: "locations".to_string(),
            server_selection_timeout_secs: 5,
            password_env: "MONGOPASS".to_string(),
        }
    }
}

impl LocatorConfig {
    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RecorderConfig {
    /// Get the server selection timeout as a Duration.
    #[must_use]
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(Self::figment(config_file))
    }

    /// Build the provider chain without extracting it.
    #[must_use]
    pub fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[DB_NAME_ENV])
                    .map(|_| "recorder.database".into()),
            )
    }

    /// Extract and validate a configuration from a figment.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        match reqwest::Url::parse(&self.locator.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(Error::config_validation(format!(
                    "locator url must be http or https, got '{}'",
                    url.scheme()
                )))
            }
            Err(e) => {
                return Err(Error::config_validation(format!(
                    "invalid locator url '{}': {e}",
                    self.locator.url
                )))
            }
        }

        if self.locator.timeout_secs == 0 {
            return Err(Error::config_validation(
                "locator.timeout_secs must be greater than 0",
            ));
        }

        let recorder = &self.recorder;
        if !matches!(recorder.scheme.as_str(), "mongodb" | "mongodb+srv") {
            return Err(Error::config_validation(format!(
                "recorder.scheme must be 'mongodb' or 'mongodb+srv', got '{}'",
                recorder.scheme
            )));
        }

        for (name, value) in [
            ("user", &recorder.user),
            ("host", &recorder.host),
            ("database", &recorder.database),
            ("collection", &recorder.collection),
            ("password_env", &recorder.password_env),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "recorder.{name} must not be empty"
                )));
            }
        }

        if recorder.server_selection_timeout_secs == 0 {
            return Err(Error::config_validation(
                "recorder.server_selection_timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }
}
