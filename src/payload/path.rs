//! Path expressions addressing nodes inside a JSON payload.
//!
//! Supports the dotted forms used in fixture tables:
//!
//! - `key2.key3` and `$.key2.key3` address nested object fields
//! - `items[0].id` addresses array elements
//! - `$['odd.key']` addresses fields whose names contain dots
//!
//! A bare `$` (or an empty string) addresses the document root.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// A segment in a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field access (e.g., "user", "name")
    Field(String),

    /// Array index access (e.g., [0], [5])
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Errors raised while parsing a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unclosed '[' in path '{0}'")]
    UnclosedBracket(String),

    #[error("invalid array index '{index}' in path '{path}'")]
    InvalidIndex { path: String, index: String },
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses a path expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_params::payload::path::{JsonPath, PathSegment};
    ///
    /// let path = JsonPath::parse("$.items[1].id").unwrap();
    /// assert_eq!(
    ///     path.segments(),
    ///     &[
    ///         PathSegment::Field("items".to_string()),
    ///         PathSegment::Index(1),
    ///         PathSegment::Field("id".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let trimmed = path.trim();
        let body = match trimmed
            .strip_prefix('$')
            .or_else(|| trimmed.strip_prefix('@'))
        {
            // `$schema` and `@type` are field names, not a root marker.
            Some(rest) if rest.is_empty() || rest.starts_with(|c| c == '.' || c == '[') => rest,
            _ => trimmed,
        };

        Ok(Self {
            raw: trimmed.to_string(),
            segments: parse_segments(trimmed, body)?,
        })
    }

    /// The path text as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path addresses the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if the path is not the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path with its final segment removed.
    pub fn parent(&self) -> Option<JsonPath> {
        let (_, init) = self.segments.split_last()?;
        Some(JsonPath {
            raw: render(init),
            segments: init.to_vec(),
        })
    }

    /// Looks up the node this path addresses.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                PathSegment::Field(name) => current.as_object()?.get(name)?,
                PathSegment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Looks up the node this path addresses, mutably.
    pub fn get_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match (segment, current) {
                (PathSegment::Field(name), Value::Object(map)) => map.get_mut(name)?,
                (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Splits the path body (without the root marker) into segments.
fn parse_segments(path: &str, body: &str) -> Result<Vec<PathSegment>, PathError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }

                // A `]` inside a quoted name does not close the bracket.
                let mut inner = String::new();
                let mut quote: Option<char> = None;
                let mut closed = false;
                for next_ch in chars.by_ref() {
                    match (quote, next_ch) {
                        (None, ']') => {
                            closed = true;
                            break;
                        }
                        (None, '\'' | '"') if inner.trim().is_empty() => quote = Some(next_ch),
                        (Some(q), c) if c == q => quote = None,
                        _ => {}
                    }
                    inner.push(next_ch);
                }
                if !closed {
                    return Err(PathError::UnclosedBracket(path.to_string()));
                }

                segments.push(parse_bracket(path, inner.trim())?);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Field(current));
    }

    Ok(segments)
}

/// `[0]` is an index, `['name']` or `["name"]` a quoted field.
fn parse_bracket(path: &str, inner: &str) -> Result<PathSegment, PathError> {
    let quoted = inner
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')));

    if let Some(name) = quoted {
        return Ok(PathSegment::Field(name.to_string()));
    }

    inner
        .parse::<usize>()
        .map(PathSegment::Index)
        .map_err(|_| PathError::InvalidIndex {
            path: path.to_string(),
            index: inner.to_string(),
        })
}

fn render(segments: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in segments {
        match segment {
            PathSegment::Field(name) if name.contains(|c| matches!(c, '.' | '[' | ']')) => {
                out.push_str(&format!("['{}']", name))
            }
            PathSegment::Field(name) => {
                out.push('.');
                out.push_str(name);
            }
            PathSegment::Index(index) => out.push_str(&format!("[{}]", index)),
        }
    }
    out
}

/// Converts a JSON value to the text stored for it.
///
/// Strings are returned unquoted; numbers, booleans and null use their JSON
/// spelling; objects and arrays are serialized compactly.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
