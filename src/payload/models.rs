//! Payload data models.

use super::error::LoadError;
use super::loader::parse_json;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How a payload's text is interpreted, as named by the external kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// `"string"`: raw text, locators are literal substrings
    String,
    /// `"json"`: a JSON document, locators are path expressions
    Json,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::String => "string",
            PayloadKind::Json => "json",
        }
    }
}

impl FromStr for PayloadKind {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(PayloadKind::String),
            "json" => Ok(PayloadKind::Json),
            other => Err(LoadError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload under mutation. The active variant decides locator semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Raw(String),
    Json(Value),
}

impl Payload {
    /// Interprets `text` as a payload of the given kind.
    ///
    /// JSON text may be relaxed (unquoted keys, comments) but must describe an
    /// object or array.
    pub fn parse(text: &str, kind: PayloadKind) -> Result<Self, LoadError> {
        match kind {
            PayloadKind::String => Ok(Payload::Raw(text.to_string())),
            PayloadKind::Json => parse_json("<inline>", text).map(Payload::Json),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Raw(_) => PayloadKind::String,
            Payload::Json(_) => PayloadKind::Json,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Payload::Raw(text) => Some(text),
            Payload::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Raw(_) => None,
            Payload::Json(value) => Some(value),
        }
    }

    /// Raw text verbatim, or the compact JSON serialization.
    pub fn render(&self) -> String {
        match self {
            Payload::Raw(text) => text.clone(),
            Payload::Json(value) => value.to_string(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Raw(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Raw(text.to_string())
    }
}
