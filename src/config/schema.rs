//! Configuration schema for fixture parameterization.
//!
//! This module defines the configuration structure and validation logic for the
//! settings that steer placeholder resolution and payload loading.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure.
///
/// All settings can be supplied under the "fixture-params" key of a settings
/// document. Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureConfig {
    /// Directory that named payload resources are loaded from.
    ///
    /// Relative paths are resolved against the current working directory.
    /// Defaults to "resources".
    #[serde(default = "default_resource_dir")]
    pub resource_dir: String,

    /// Upper bound on placeholder substitutions performed by one resolve call.
    ///
    /// Guards against registry values that reintroduce their own placeholder.
    /// Defaults to 1000. Must be greater than 0.
    #[serde(default = "default_max_substitutions")]
    pub max_substitutions: usize,

    /// In-process properties consulted by `${...}` placeholders before the
    /// process environment. Defaults to empty.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            max_substitutions: default_max_substitutions(),
            properties: HashMap::new(),
        }
    }
}

impl FixtureConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive message.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_substitutions == 0 {
            return Err("maxSubstitutions must be greater than 0".to_string());
        }

        if self.resource_dir.trim().is_empty() {
            return Err("resourceDir must not be empty".to_string());
        }

        Ok(())
    }

    /// Merges this configuration with another, using values from `other`.
    ///
    /// Properties are combined, with entries from `other` winning on conflict.
    pub fn merge(&self, other: &FixtureConfig) -> Self {
        let mut properties = self.properties.clone();
        properties.extend(
            other
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            resource_dir: other.resource_dir.clone(),
            max_substitutions: other.max_substitutions,
            properties,
        }
    }
}

fn default_resource_dir() -> String {
    "resources".to_string()
}

fn default_max_substitutions() -> usize {
    1000
}
