//! Step module
//!
//! Step records and the rewriter that resolves placeholders in them before
//! they are dispatched.

pub mod models;
pub mod rewriter;

pub use models::{DataTableRow, DocString, Step, StepArgument};
pub use rewriter::StepRewriter;
