//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `PLATFORM_AHP` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use platform_ahp::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init();
//! ```

mod ahp;
mod database;
mod error;
mod logging;

pub use ahp::AhpConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection
    pub database: DatabaseConfig,

    /// Calculation policy
    #[serde(default)]
    pub ahp: AhpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables prefixed with
    /// `PLATFORM_AHP`:
    ///
    /// - `PLATFORM_AHP__DATABASE__URL=...` -> `database.url`
    /// - `PLATFORM_AHP__AHP__CONSISTENCY_THRESHOLD=0.1` -> `ahp.consistency_threshold`
    /// - `PLATFORM_AHP__LOGGING__FORMAT=json` -> `logging.format`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PLATFORM_AHP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.ahp.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
