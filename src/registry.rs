//! Runtime registry backing `!{key}` placeholders.
//!
//! Values are written earlier in a run (typically captured from a response body)
//! and read back when later fixture text is resolved. The store is a sharded
//! concurrent map: each get or set on a single key is atomic, writers to
//! different keys never coordinate, and the last write to a key wins.

use crate::payload::path::{value_to_text, JsonPath, PathError};
use dashmap::DashMap;
use log::debug;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Process-wide registry used when no explicit registry is supplied.
static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Errors raised while capturing a value into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Failed to parse JSON document: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    InvalidPath(#[from] PathError),

    #[error("Path '{0}' not found in JSON document")]
    PathNotFound(String),
}

/// Thread-safe, cloneable handle to a string-keyed value store.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct Registry {
    values: Arc<DashMap<String, String>>,
}

impl Registry {
    /// Creates a new, empty registry independent of the global one.
    pub fn new() -> Self {
        Self {
            values: Arc::new(DashMap::new()),
        }
    }

    /// Returns a handle to the process-wide registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_params::Registry;
    ///
    /// Registry::global().set("doc-example-key", "42");
    /// assert_eq!(Registry::global().get("doc-example-key"), Some("42".to_string()));
    /// # Registry::global().remove("doc-example-key");
    /// ```
    pub fn global() -> Registry {
        GLOBAL.clone()
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|entry| entry.value().clone())
    }

    /// Stores a value, returning the one it replaced.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.remove(key).map(|(_, value)| value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&self) {
        self.values.clear();
    }

    /// Copies the current contents into a plain map.
    ///
    /// Concurrent writers may or may not be reflected.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Extracts the node at `path` from a JSON document and stores it under `key`.
    ///
    /// Strings are stored unquoted; other values use their compact JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_params::Registry;
    ///
    /// let registry = Registry::new();
    /// let body = r#"{"user": {"id": 123, "token": "abc"}}"#;
    ///
    /// registry.capture(body, "$.user.token", "authToken").unwrap();
    /// assert_eq!(registry.get("authToken"), Some("abc".to_string()));
    /// ```
    pub fn capture(&self, json: &str, path: &str, key: &str) -> Result<String, CaptureError> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| CaptureError::InvalidJson(e.to_string()))?;
        let path = JsonPath::parse(path)?;

        let value = path
            .get(&document)
            .map(value_to_text)
            .ok_or_else(|| CaptureError::PathNotFound(path.to_string()))?;

        debug!("Saving element {} with value {} under key {}", path, value, key);
        self.set(key, value.clone());
        Ok(value)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
