//! Payload mutation engine.
//!
//! Specs apply strictly left to right, each one seeing the payload produced by
//! the specs before it. The caller's payload is never modified; every call
//! works on its own copy.
//!
//! Raw payloads treat the locator as a literal substring and act on its first
//! occurrence only. JSON payloads treat the locator as a path expression (see
//! [`JsonPath`]) and leave every node the path does not address untouched.

use super::error::{MutationError, MutationFailure};
use super::models::Payload;
use super::mutation::{MutationSpec, Operation};
use super::path::{JsonPath, PathSegment};
use log::debug;
use serde_json::Value;

/// Applies `specs` in order to a copy of `payload`.
///
/// On failure the returned [`MutationFailure`] holds the index of the failing
/// spec and the payload with all earlier specs applied.
///
/// # Examples
///
/// ```
/// use fixture_params::payload::{apply, MutationSpec, Operation, Payload};
///
/// let payload = Payload::from("username=username&password=password");
/// let specs = [MutationSpec::new("username=username&", Operation::Delete, "N/A")];
///
/// let result = apply(&payload, &specs).unwrap();
/// assert_eq!(result.render(), "password=password");
/// ```
pub fn apply(payload: &Payload, specs: &[MutationSpec]) -> Result<Payload, MutationFailure> {
    let mut current = payload.clone();

    for (index, spec) in specs.iter().enumerate() {
        if let Err(error) = apply_spec(&mut current, spec) {
            return Err(MutationFailure::new(index, current, error));
        }
    }

    Ok(current)
}

/// Applies tabular rows of `(locator, operation, argument)` in order.
///
/// Each row is parsed only when its turn comes, so a malformed row `k` fails
/// with rows `0..k` already applied.
pub fn apply_rows<I, R, S>(payload: &Payload, rows: I) -> Result<Payload, MutationFailure>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut current = payload.clone();

    for (index, row) in rows.into_iter().enumerate() {
        let result = MutationSpec::from_row(row.as_ref())
            .and_then(|spec| apply_spec(&mut current, &spec));
        if let Err(error) = result {
            return Err(MutationFailure::new(index, current, error));
        }
    }

    Ok(current)
}

/// Applies one spec in place.
///
/// On error the payload is left exactly as it was.
pub fn apply_spec(payload: &mut Payload, spec: &MutationSpec) -> Result<(), MutationError> {
    debug!("Applying {} to {} payload", spec, payload.kind());

    match payload {
        Payload::Raw(text) => apply_to_text(text, spec),
        Payload::Json(value) => apply_to_json(value, spec),
    }
}

fn apply_to_text(text: &mut String, spec: &MutationSpec) -> Result<(), MutationError> {
    let locator = spec.locator.as_str();
    let argument = spec.argument.as_str();

    match spec.operation {
        Operation::Add => text.push_str(argument),
        Operation::Delete => {
            if let Some(pos) = text.find(locator) {
                text.replace_range(pos..pos + locator.len(), "");
            }
        }
        Operation::Update => {
            if let Some(pos) = text.find(locator) {
                text.replace_range(pos..pos + locator.len(), argument);
            }
        }
        Operation::Prepend => {
            if let Some(pos) = text.find(locator) {
                text.insert_str(pos, argument);
            }
        }
        Operation::Append => {
            if let Some(pos) = text.find(locator) {
                text.insert_str(pos + locator.len(), argument);
            }
        }
        Operation::Replace => {
            let (needle, replacement) = spec.replacement()?;
            *text = text.replacen(needle, replacement, 1);
        }
    }

    Ok(())
}

fn apply_to_json(root: &mut Value, spec: &MutationSpec) -> Result<(), MutationError> {
    let path = JsonPath::parse(&spec.locator).map_err(|source| MutationError::InvalidLocator {
        locator: spec.locator.clone(),
        source,
    })?;

    match spec.operation {
        Operation::Delete => {
            delete_node(root, &path);
            Ok(())
        }
        Operation::Add => add_node(root, &path, parse_argument(&spec.argument)),
        Operation::Update => {
            let node = path
                .get_mut(root)
                .ok_or_else(|| MutationError::PathNotFound(spec.locator.clone()))?;
            *node = Value::String(spec.argument.clone());
            Ok(())
        }
        Operation::Append => {
            let target = string_at(root, &path, &spec.locator)?;
            target.push_str(&spec.argument);
            Ok(())
        }
        Operation::Prepend => {
            let target = string_at(root, &path, &spec.locator)?;
            target.insert_str(0, &spec.argument);
            Ok(())
        }
        Operation::Replace => {
            let (needle, replacement) = spec.replacement()?;
            let target = string_at(root, &path, &spec.locator)?;
            *target = target.replacen(needle, replacement, 1);
            Ok(())
        }
    }
}

/// Removes the addressed node from its parent. Missing nodes are ignored.
fn delete_node(root: &mut Value, path: &JsonPath) {
    let (Some(parent_path), Some(last)) = (path.parent(), path.last()) else {
        return;
    };

    match (last, parent_path.get_mut(root)) {
        (PathSegment::Field(name), Some(Value::Object(map))) => {
            map.remove(name);
        }
        (PathSegment::Index(index), Some(Value::Array(items))) if *index < items.len() => {
            items.remove(*index);
        }
        _ => debug!("Nothing to delete at {}", path),
    }
}

/// Creates the addressed node under its parent, replacing any existing field.
fn add_node(root: &mut Value, path: &JsonPath, value: Value) -> Result<(), MutationError> {
    let not_found = || MutationError::PathNotFound(path.to_string());

    let (Some(parent_path), Some(last)) = (path.parent(), path.last()) else {
        return Err(not_found());
    };

    match (last, parent_path.get_mut(root)) {
        (PathSegment::Field(name), Some(Value::Object(map))) => {
            map.insert(name.clone(), value);
            Ok(())
        }
        (PathSegment::Index(index), Some(Value::Array(items))) if *index <= items.len() => {
            items.insert(*index, value);
            Ok(())
        }
        _ => Err(not_found()),
    }
}

fn string_at<'a>(
    root: &'a mut Value,
    path: &JsonPath,
    locator: &str,
) -> Result<&'a mut String, MutationError> {
    match path.get_mut(root) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(MutationError::NotAString(locator.to_string())),
        None => Err(MutationError::PathNotFound(locator.to_string())),
    }
}

/// ADD stores its argument as JSON when it parses, otherwise as a string.
fn parse_argument(argument: &str) -> Value {
    serde_json::from_str(argument).unwrap_or_else(|_| Value::String(argument.to_string()))
}
