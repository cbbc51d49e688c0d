//! Property sources backing `${...}` placeholders.

use std::collections::HashMap;
use std::env;

/// A named-property lookup.
pub trait PropertySource: Send + Sync {
    /// Returns the property value, or `None` if it is not set.
    fn property(&self, name: &str) -> Option<String>;
}

impl PropertySource for HashMap<String, String> {
    fn property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// In-process properties overlaid on the process environment.
///
/// Overrides are consulted first; anything not overridden is read from the
/// environment at lookup time.
#[derive(Debug, Clone, Default)]
pub struct SystemProperties {
    overrides: HashMap<String, String>,
}

impl SystemProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source with the given overrides.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Sets an in-process property, shadowing any environment variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(name.into(), value.into());
    }
}

impl PropertySource for SystemProperties {
    fn property(&self, name: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }

        env::var(name).ok()
    }
}
