use std::str::FromStr;

use anyhow::Result;
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{DEFAULT_ID_PREFIX, DEFAULT_LOG_LEVEL, DEFAULT_TIMEZONE};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// IANA name of the zone local wall-clock times are rendered in.
    pub timezone: String,
    pub id_prefix: String,
    pub lenient: bool,
}

impl IngestConfig {
    /// ## Summary
    /// Resolves the configured display timezone.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the name is not a known IANA zone.
    pub fn display_timezone(&self) -> CoreResult<Tz> {
        Tz::from_str(self.timezone.trim()).map_err(|e| {
            CoreError::InvalidConfiguration(format!("ingest.timezone `{}`: {e}", self.timezone))
        })
    }
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with every default value.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be registered.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            .set_default("ingest.timezone", DEFAULT_TIMEZONE)?
            .set_default("ingest.id_prefix", DEFAULT_ID_PREFIX)?
            .set_default("ingest.lenient", true)?)
    }

    /// ## Summary
    /// Loads configuration from an optional `config.toml` and `CLASSFEED_*`
    /// environment variables into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env, e.g. CLASSFEED_INGEST__TIMEZONE=America/Bogota
            .add_source(
                config::Environment::with_prefix("CLASSFEED")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
