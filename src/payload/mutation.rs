//! Mutation specs: one `(locator, operation, argument)` edit each.

use super::error::MutationError;
use std::fmt;
use std::str::FromStr;

/// Separator between needle and replacement in a REPLACE argument.
pub const REPLACE_SEPARATOR: &str = "->";

/// Edit operations. Tokens are matched exactly and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Delete,
    Update,
    Append,
    Prepend,
    Replace,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "ADD",
            Operation::Delete => "DELETE",
            Operation::Update => "UPDATE",
            Operation::Append => "APPEND",
            Operation::Prepend => "PREPEND",
            Operation::Replace => "REPLACE",
        }
    }
}

impl FromStr for Operation {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(Operation::Add),
            "DELETE" => Ok(Operation::Delete),
            "UPDATE" => Ok(Operation::Update),
            "APPEND" => Ok(Operation::Append),
            "PREPEND" => Ok(Operation::Prepend),
            "REPLACE" => Ok(Operation::Replace),
            other => Err(MutationError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single edit applied to a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationSpec {
    /// Literal substring (raw payloads) or path expression (JSON payloads)
    pub locator: String,
    pub operation: Operation,
    pub argument: String,
}

impl MutationSpec {
    pub fn new(
        locator: impl Into<String>,
        operation: Operation,
        argument: impl Into<String>,
    ) -> Self {
        Self {
            locator: locator.into(),
            operation,
            argument: argument.into(),
        }
    }

    /// Parses a table row of exactly three cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_params::payload::{MutationSpec, Operation};
    ///
    /// let spec = MutationSpec::from_row(&["key2.key3", "APPEND", "Append"]).unwrap();
    /// assert_eq!(spec.operation, Operation::Append);
    ///
    /// let err = MutationSpec::from_row(&["key1", "REMOVE", "N/A"]).unwrap_err();
    /// assert_eq!(err.to_string(), "Modification type does not exist: REMOVE");
    /// ```
    pub fn from_row<S: AsRef<str>>(cells: &[S]) -> Result<Self, MutationError> {
        let [locator, operation, argument] = cells else {
            return Err(MutationError::InvalidRow(cells.len()));
        };

        Ok(Self {
            locator: locator.as_ref().to_string(),
            operation: operation.as_ref().parse()?,
            argument: argument.as_ref().to_string(),
        })
    }

    /// Splits a REPLACE argument on its first `->`.
    pub fn replacement(&self) -> Result<(&str, &str), MutationError> {
        self.argument
            .split_once(REPLACE_SEPARATOR)
            .ok_or_else(|| MutationError::InvalidReplacement(self.argument.clone()))
    }
}

impl fmt::Display for MutationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.operation, self.locator, self.argument)
    }
}
