//! Step data models.
//!
//! A step is one line of fixture text together with the arguments attached to
//! it: an optional table of cells and an optional doc block. Steps are
//! immutable once built; rewriting always produces a new value.

use serde::{Deserialize, Serialize};

/// A single step of a fixture scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Leading keyword (`Given`, `When`, ...), passed through as-is
    pub keyword: String,

    /// Step text following the keyword
    pub text: String,

    /// 1-based line number in the source file
    pub line: usize,

    /// Comment lines attached above the step
    #[serde(default)]
    pub comments: Vec<String>,

    /// Data table rows, if the step carries a table
    #[serde(default)]
    pub rows: Option<Vec<DataTableRow>>,

    /// Doc block argument, if the step carries one
    #[serde(default)]
    pub doc_string: Option<DocString>,
}

impl Step {
    /// Creates a step with no table and no doc block.
    pub fn new(keyword: impl Into<String>, text: impl Into<String>, line: usize) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
            line,
            comments: Vec::new(),
            rows: None,
            doc_string: None,
        }
    }

    /// Attaches a data table.
    pub fn with_rows(mut self, rows: Vec<DataTableRow>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Attaches a doc block.
    pub fn with_doc_string(mut self, doc_string: DocString) -> Self {
        self.doc_string = Some(doc_string);
        self
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    /// Table cells as plain rows; empty when the step has no table.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .as_ref()
            .map(|rows| rows.iter().map(|r| r.cells.clone()).collect())
            .unwrap_or_default()
    }
}

/// One row of a step's data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableRow {
    #[serde(default)]
    pub comments: Vec<String>,

    /// Cell values in column order
    pub cells: Vec<String>,

    /// 1-based line number, when known
    #[serde(default)]
    pub line: Option<usize>,
}

impl DataTableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            comments: Vec::new(),
            cells,
            line: None,
        }
    }

    /// Builds a row from string slices.
    pub fn from_cells(cells: &[&str]) -> Self {
        Self::new(cells.iter().map(|c| c.to_string()).collect())
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }
}

/// A doc block attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocString {
    /// Optional content type marker after the opening delimiter
    #[serde(default)]
    pub content_type: Option<String>,

    pub content: String,

    /// 1-based line number of the opening delimiter
    pub line: usize,
}

impl DocString {
    pub fn new(content: impl Into<String>, line: usize) -> Self {
        Self {
            content_type: None,
            content: content.into(),
            line,
        }
    }
}

/// A matched step argument: its byte offset in the step text and the captured
/// value, if the group matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepArgument {
    pub offset: usize,
    pub value: Option<String>,
}

impl StepArgument {
    pub fn new(offset: usize, value: Option<String>) -> Self {
        Self { offset, value }
    }
}
