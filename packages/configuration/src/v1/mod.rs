//! Version `1` of the configuration.
//!
//! | Section   | Purpose                                       |
//! |-----------|-----------------------------------------------|
//! | `logging` | [`Logging`](logging::Logging) threshold/style |
//! | `freeze`  | [`Freeze`](freeze::Freeze) scope parameters   |
//!
//! Values from the environment have priority over the TOML document. Nested
//! values are addressed with dots: `FREEZECLOCK_FREEZE.TIMEZONE=Europe/Madrid`.
pub mod freeze;
pub mod logging;

use std::fs;
use std::sync::Arc;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::freeze::Freeze;
use self::logging::Logging;
use crate::{Error, Info, ENV_VAR_PREFIX};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration.
    #[serde(default)]
    pub logging: Logging,

    /// The freeze scope configuration.
    #[serde(default)]
    pub freeze: Freeze,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct: the inline TOML
    /// document if there is one, the TOML file otherwise.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the document can not be read or has a bad configuration.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = match &info.config_toml {
            Some(config_toml) => Figment::new().merge(Toml::string(config_toml)),
            None => Figment::new().merge(Toml::file(&info.config_toml_path)),
        };

        let config: Configuration = figment.merge(Env::prefixed(ENV_VAR_PREFIX)).extract()?;

        Ok(config)
    }

    /// Loads the configuration from the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `path` does not exist or has a bad configuration.
    pub fn load_from_file(path: &str) -> Result<Configuration, Error> {
        let figment = Figment::new().merge(Toml::file(path)).merge(Env::prefixed(ENV_VAR_PREFIX));

        let config: Configuration = figment.extract()?;

        Ok(config)
    }

    /// Saves the configuration to the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration can not be encoded to TOML or the
    /// file can not be written.
    pub fn save_to_file(&self, path: &str) -> Result<(), Error> {
        fs::write(path, self.to_toml()?).map_err(|err| Error::UnableToWriteConfigFile { source: Arc::new(err) })
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration can not be encoded.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string(self).map_err(|source| Error::UnableToEncodeToml { source })
    }
}
