//! Configuration data structures for freezeclock.
//!
//! A configuration describes one freeze scope (the instant to freeze at, the
//! simulated timezone, whether the clock ticks) and the logging threshold used
//! by the test run. It can be given as a whole TOML document in an environment
//! variable or as a TOML file, and every value can be overridden with
//! `FREEZECLOCK_`-prefixed environment variables:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [freeze]
//! instant = "2014-01-01T00:00:00"
//! timezone = "America/New_York"
//! tick = false
//! fold = 0
//! extra_datetime_targets = []
//! extra_time_targets = []
//! ```
//!
//! The current version for configuration is [`v1`].
pub mod v1;
pub mod validator;

use std::env;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

// Environment variables

/// The whole `freezeclock.toml` file content. It has priority over the config file.
const ENV_VAR_CONFIG_TOML: &str = "FREEZECLOCK_CONFIG_TOML";

/// The `freezeclock.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "FREEZECLOCK_CONFIG_TOML_PATH";

/// Prefix of the environment variables overriding single values, for example
/// `FREEZECLOCK_FREEZE.TICK=true`.
pub const ENV_VAR_PREFIX: &str = "FREEZECLOCK_";

pub type Configuration = v1::Configuration;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;
pub type Style = v1::logging::Style;
pub type Freeze = v1::freeze::Freeze;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    ///
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            info!("Loading configuration from environment variable {ENV_VAR_CONFIG_TOML}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            info!("Loading configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            info!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Configuration info for an inline TOML document.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: String::new(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to load the configuration from the configuration file.
    #[error("Failed processing the configuration: {source}")]
    ConfigError { source: Arc<figment::Error> },

    #[error("Unable to write the configuration file: {source}")]
    UnableToWriteConfigFile { source: Arc<std::io::Error> },

    #[error("Unable to encode the configuration as TOML: {source}")]
    UnableToEncodeToml { source: toml::ser::Error },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError { source: Arc::new(err) }
    }
}
