//! Step rewriting.
//!
//! Resolves placeholders in every textual leaf of a step right before it is
//! dispatched: the step text and each table cell. Keyword, comments, line
//! numbers and the doc block pass through untouched.

use super::models::{DataTableRow, Step, StepArgument};
use crate::failure::FailureLog;
use crate::placeholder::{ResolutionError, Resolver};
use log::debug;

/// Rewrites steps with a [`Resolver`].
#[derive(Debug, Clone, Default)]
pub struct StepRewriter {
    resolver: Resolver,
}

impl StepRewriter {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Returns a new step with the text and every table cell resolved.
    ///
    /// Row order, column order and row metadata are preserved. The doc block is
    /// copied as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_params::step::{DataTableRow, Step, StepRewriter};
    /// use fixture_params::{Registry, Resolver};
    ///
    /// let registry = Registry::new();
    /// registry.set("id", "42");
    /// let rewriter = StepRewriter::new(Resolver::new().with_registry(registry));
    ///
    /// let step = Step::new("When ", "I fetch user !{id}", 7)
    ///     .with_rows(vec![DataTableRow::from_cells(&["id", "!{id}"])]);
    ///
    /// let rewritten = rewriter.rewrite(&step).unwrap();
    /// assert_eq!(rewritten.text, "I fetch user 42");
    /// assert_eq!(rewritten.cells(), vec![vec!["id".to_string(), "42".to_string()]]);
    /// ```
    pub fn rewrite(&self, step: &Step) -> Result<Step, ResolutionError> {
        let text = self.resolver.resolve(&step.text)?;

        let rows = step
            .rows
            .as_ref()
            .map(|rows| {
                rows.iter()
                    .map(|row| self.rewrite_row(row))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        if text != step.text {
            debug!("Rewrote step at line {}: {}", step.line, text);
        }

        Ok(Step {
            keyword: step.keyword.clone(),
            text,
            line: step.line,
            comments: step.comments.clone(),
            rows,
            doc_string: step.doc_string.clone(),
        })
    }

    fn rewrite_row(&self, row: &DataTableRow) -> Result<DataTableRow, ResolutionError> {
        let cells = row
            .cells
            .iter()
            .map(|cell| self.resolver.resolve(cell))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DataTableRow {
            comments: row.comments.clone(),
            cells,
            line: row.line,
        })
    }

    /// Rewrites a whole step list up front, stopping at the first failure.
    pub fn rewrite_all(&self, steps: &[Step]) -> Result<Vec<Step>, ResolutionError> {
        steps.iter().map(|step| self.rewrite(step)).collect()
    }

    /// Resolves matched step arguments. Arguments without a value are kept.
    pub fn rewrite_arguments(
        &self,
        arguments: &[StepArgument],
    ) -> Result<Vec<StepArgument>, ResolutionError> {
        arguments
            .iter()
            .map(|arg| {
                let value = arg
                    .value
                    .as_deref()
                    .map(|v| self.resolver.resolve(v))
                    .transpose()?;
                Ok::<_, ResolutionError>(StepArgument::new(arg.offset, value))
            })
            .collect()
    }

    /// Rewrites `step` and hands the result to `dispatch`.
    ///
    /// `dispatch` only ever sees the rewritten step; if rewriting fails it is
    /// not called.
    pub fn intercept<F, T, E>(&self, step: &Step, dispatch: F) -> Result<T, E>
    where
        F: FnOnce(Step) -> Result<T, E>,
        E: From<ResolutionError>,
    {
        let rewritten = self.rewrite(step)?;
        dispatch(rewritten)
    }

    /// Like [`intercept`](Self::intercept), but records a rewrite failure in
    /// `failures` and skips dispatch instead of returning the error.
    pub fn intercept_collecting<F, T>(
        &self,
        step: &Step,
        failures: &FailureLog,
        dispatch: F,
    ) -> Option<T>
    where
        F: FnOnce(Step) -> T,
    {
        match self.rewrite(step) {
            Ok(rewritten) => Some(dispatch(rewritten)),
            Err(e) => {
                failures.record(e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::step::models::DocString;
    use std::collections::HashMap;

    fn create_rewriter() -> StepRewriter {
        let mut props = HashMap::new();
        props.insert("HOST".to_string(), "Example.org".to_string());

        let registry = Registry::new();
        registry.set("token", "t-1");

        StepRewriter::new(
            Resolver::new()
                .with_properties(props)
                .with_registry(registry),
        )
    }

    fn create_step() -> Step {
        Step::new("Given ", "I call ${HOST.toLower}", 10)
            .with_comments(vec!["# auth".to_string()])
            .with_rows(vec![
                DataTableRow::from_cells(&["header", "value"]).at_line(11),
                DataTableRow::from_cells(&["Authorization", "Bearer !{token}"])
                    .at_line(12)
                    .with_comments(vec!["# token row".to_string()]),
            ])
            .with_doc_string(DocString::new("{\"token\": \"!{token}\"}", 13))
    }

    #[test]
    fn test_rewrite_text_and_cells() {
        let rewritten = create_rewriter().rewrite(&create_step()).unwrap();

        assert_eq!(rewritten.text, "I call example.org");
        assert_eq!(
            rewritten.cells(),
            vec![
                vec!["header".to_string(), "value".to_string()],
                vec!["Authorization".to_string(), "Bearer t-1".to_string()],
            ]
        );
    }

    #[test]
    fn test_rewrite_preserves_metadata() {
        let step = create_step();
        let rewritten = create_rewriter().rewrite(&step).unwrap();

        assert_eq!(rewritten.keyword, step.keyword);
        assert_eq!(rewritten.line, 10);
        assert_eq!(rewritten.comments, step.comments);

        let rows = rewritten.rows.unwrap();
        assert_eq!(rows[0].line, Some(11));
        assert_eq!(rows[1].line, Some(12));
        assert_eq!(rows[1].comments, vec!["# token row".to_string()]);
    }

    #[test]
    fn test_rewrite_leaves_doc_block() {
        let step = create_step();
        let rewritten = create_rewriter().rewrite(&step).unwrap();
        assert_eq!(rewritten.doc_string, step.doc_string);
    }

    #[test]
    fn test_rewrite_does_not_touch_input() {
        let step = create_step();
        let before = step.clone();
        let _ = create_rewriter().rewrite(&step).unwrap();
        assert_eq!(step, before);
    }

    #[test]
    fn test_rewrite_failure_in_cell() {
        let step = Step::new("Then ", "plain", 1)
            .with_rows(vec![DataTableRow::from_cells(&["!{missing}"])]);
        assert_eq!(
            create_rewriter().rewrite(&step).unwrap_err(),
            ResolutionError::MissingKey("missing".to_string())
        );
    }

    #[test]
    fn test_rewrite_all() {
        let steps = vec![
            Step::new("Given ", "${HOST}", 1),
            Step::new("When ", "!{token}", 2),
        ];
        let rewritten = create_rewriter().rewrite_all(&steps).unwrap();
        assert_eq!(rewritten[0].text, "Example.org");
        assert_eq!(rewritten[1].text, "t-1");
    }

    #[test]
    fn test_rewrite_arguments() {
        let args = vec![
            StepArgument::new(0, Some("!{token}".to_string())),
            StepArgument::new(9, None),
        ];
        let rewritten = create_rewriter().rewrite_arguments(&args).unwrap();
        assert_eq!(rewritten[0], StepArgument::new(0, Some("t-1".to_string())));
        assert_eq!(rewritten[1], StepArgument::new(9, None));
    }

    #[test]
    fn test_intercept_dispatches_rewritten_step() {
        let rewriter = create_rewriter();
        let seen: Result<String, ResolutionError> =
            rewriter.intercept(&create_step(), |step| Ok(step.text));
        assert_eq!(seen.unwrap(), "I call example.org");
    }

    #[test]
    fn test_intercept_skips_dispatch_on_error() {
        let rewriter = create_rewriter();
        let mut called = false;
        let result: Result<(), ResolutionError> =
            rewriter.intercept(&Step::new("When ", "!{nope}", 1), |_| {
                called = true;
                Ok(())
            });
        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn test_intercept_collecting_records_failure() {
        let rewriter = create_rewriter();
        let failures = FailureLog::new();

        let ok = rewriter.intercept_collecting(&Step::new("Given ", "${HOST}", 1), &failures, |s| {
            s.text
        });
        assert_eq!(ok.as_deref(), Some("Example.org"));

        let skipped =
            rewriter.intercept_collecting(&Step::new("When ", "!{nope}", 2), &failures, |s| s.text);
        assert!(skipped.is_none());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures.last(), Some("Key not found in registry: nope".to_string()));
    }
}
