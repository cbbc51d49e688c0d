//! Resource loading for payload fixtures.
//!
//! Resources are looked up by name relative to a root directory. A resource
//! loaded as `json` must parse as strict JSON or, failing that, as relaxed
//! JSON (YAML flow syntax: unquoted keys and values, `#` comments) describing
//! an object or array. JSON resources are handed back in compact form so
//! downstream string handling sees one canonical spelling.

use super::error::LoadError;
use super::models::{Payload, PayloadKind};
use crate::config::get_config;
use log::debug;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Loads a named resource as text.
pub trait ResourceLoader: Send + Sync {
    /// Returns the resource text; for [`PayloadKind::Json`] the text is
    /// validated and normalized to compact JSON.
    fn load(&self, name: &str, kind: PayloadKind) -> Result<String, LoadError>;
}

/// Loads resources from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a loader rooted at the configured `resourceDir`.
    pub fn from_config() -> Self {
        Self::new(get_config().resource_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for FsLoader {
    fn default() -> Self {
        Self::from_config()
    }
}

impl ResourceLoader for FsLoader {
    fn load(&self, name: &str, kind: PayloadKind) -> Result<String, LoadError> {
        let path = self.root.join(name);
        debug!("Loading {} resource from {}", kind, path.display());

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(name.to_string()))
            }
            Err(source) => {
                return Err(LoadError::Io {
                    name: name.to_string(),
                    source,
                })
            }
        };

        match kind {
            PayloadKind::String => Ok(text),
            PayloadKind::Json => parse_json(name, &text).map(|value| value.to_string()),
        }
    }
}

/// Parses strict JSON, falling back to relaxed JSON.
///
/// The document must be an object or an array.
pub fn parse_json(name: &str, text: &str) -> Result<Value, LoadError> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(strict) => {
            debug!("{} is not strict JSON ({}), trying relaxed syntax", name, strict);
            let relaxed = serde_yaml::from_str::<serde_yaml::Value>(text)
                .map_err(|e| invalid_json(name, e.to_string()))?;
            serde_json::to_value(relaxed).map_err(|e| invalid_json(name, e.to_string()))?
        }
    };

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(invalid_json(
            name,
            format!("expected an object or array, found {}", type_name(&other)),
        )),
    }
}

/// Loads `name` with `loader` and interprets it as a payload of `kind`.
pub fn load_with(
    loader: &dyn ResourceLoader,
    name: &str,
    kind: PayloadKind,
) -> Result<Payload, LoadError> {
    let text = loader.load(name, kind)?;
    match kind {
        PayloadKind::String => Ok(Payload::Raw(text)),
        PayloadKind::Json => parse_json(name, &text).map(Payload::Json),
    }
}

/// Loads `name` from the configured resource directory as a typed payload.
pub fn load_payload(name: &str, kind: PayloadKind) -> Result<Payload, LoadError> {
    load_with(&FsLoader::from_config(), name, kind)
}

fn invalid_json(name: &str, message: String) -> LoadError {
    LoadError::InvalidJson {
        name: name.to_string(),
        message,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
