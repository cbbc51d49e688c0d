//! Configuration management for fixture parameterization.
//!
//! Configuration is read from a settings document under the "fixture-params" key,
//! merged with defaults, validated, and published through a process-wide singleton.

pub mod schema;

pub use schema::FixtureConfig;

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

/// Settings key the configuration is read from.
pub const SETTINGS_KEY: &str = "fixture-params";

/// Global configuration instance.
static CONFIG: Lazy<RwLock<FixtureConfig>> = Lazy::new(|| RwLock::new(FixtureConfig::default()));

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The merged configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The configuration file could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads configuration from a settings JSON value.
///
/// The "fixture-params" entry, if present, is merged over the defaults. A
/// malformed entry is logged and ignored. The validated result replaces the
/// global configuration.
///
/// # Example
///
/// ```
/// use fixture_params::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "fixture-params": {
///         "resourceDir": "schemas"
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.resource_dir, "schemas");
/// # fixture_params::config::reset_config();
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<FixtureConfig, ConfigError> {
    let mut config = FixtureConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<FixtureConfig>(section.clone()) {
            Ok(user_config) => config = config.merge(&user_config),
            Err(e) => warn!("Failed to parse {} settings: {}. Using defaults.", SETTINGS_KEY, e),
        }
    }

    config.validate().map_err(ConfigError::Invalid)?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Loads configuration from a JSON file holding a settings document.
///
/// Unlike [`load_config`], a file that exists but does not parse is an error.
pub fn load_config_file(path: &Path) -> Result<FixtureConfig, ConfigError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    let settings: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })?;

    load_config(Some(settings))
}

/// Returns a clone of the current global configuration.
pub fn get_config() -> FixtureConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| FixtureConfig::default())
}

/// Updates the global configuration in place.
///
/// Reverts to defaults if the update leaves the configuration invalid.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut FixtureConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            warn!("Configuration validation failed after update: {}", e);
            *config = FixtureConfig::default();
        }
    }
}

/// Resets the global configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = FixtureConfig::default();
    }
}
