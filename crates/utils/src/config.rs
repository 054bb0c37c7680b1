use std::collections::HashMap;

use libcircles_core::error::CirclesError;
use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};

/// A section of the configuration file.
pub trait Config: DeserializeOwned + Serialize {
    fn section_name() -> &'static str;

    fn load() -> Result<Self, CirclesError> {
        ConfigLoader::load_cfg(Self::section_name())
    }

    fn must_load() -> Self {
        Self::load().expect("failed to load config")
    }
}

pub trait ConfigDefault: Config + Default {
    fn load_or_default() -> Result<Self, CirclesError> {
        ConfigLoader::load_cfg_or_default(
            Self::section_name(),
            Self::default(),
        )
    }

    fn must_load_or_default() -> Self {
        Self::load_or_default().expect("failed to load config")
    }
}

impl<T: Config + Default> ConfigDefault for T {}

pub struct ConfigLoader {}

pub static CONFIG_FILE_ENV_VAR: &str = "CIRCLES_CONFIG";
pub static CONFIG_FILE_DEFAULT: &str = "config.toml";
pub static CONFIG_ENV_PREFIX: &str = "CIRCLES";
pub static CONFIG_ENV_PREFIX_SEPARATOR: &str = "_";
pub static CONFIG_ENV_SEPARATOR: &str = "__";

impl ConfigLoader {
    fn config_file() -> String {
        std::env::var(CONFIG_FILE_ENV_VAR)
            .unwrap_or_else(|_| CONFIG_FILE_DEFAULT.to_string())
    }

    /// Sources in increasing precedence: `default`, the TOML file,
    /// environment variables such as `CIRCLES_LOG__CONSOLE_LEVEL`.
    pub fn load_cfg_or_default<T: Config>(
        section: &str,
        default: T,
    ) -> Result<T, CirclesError> {
        Self::load_from(&Self::config_file(), section, Some(default))
    }

    pub fn load_cfg<T: Config>(section: &str) -> Result<T, CirclesError> {
        Self::load_from(&Self::config_file(), section, None)
    }

    pub fn load_from<T: Config>(
        config_file: &str,
        section: &str,
        default: Option<T>,
    ) -> Result<T, CirclesError> {
        let mut builder = config::Config::builder();
        if let Some(default) = &default {
            let nested = HashMap::from([(section, default)]);
            let default_source =
                config::Config::try_from(&nested).map_err(|e| {
                    CirclesError::Config(format!(
                        "failed to load default config: {}",
                        e
                    ))
                })?;
            builder = builder.add_source(default_source);
        }
        let cfg = builder
            .add_source(
                config::File::new(config_file, config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator(CONFIG_ENV_PREFIX_SEPARATOR)
                    .separator(CONFIG_ENV_SEPARATOR),
            )
            .build()
            .map_err(|e| {
                CirclesError::Config(format!(
                    "failed to build config builder: {}",
                    e
                ))
            })?;
        let c: T = cfg.get(section).or_else(|e| match (e, default) {
            (config::ConfigError::NotFound(_), Some(default)) => Ok(default),
            (e, _) => Err(CirclesError::Config(format!("{}", e))),
        })?;
        Ok(c)
    }
}
