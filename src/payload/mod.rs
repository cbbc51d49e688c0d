//! Payload module
//!
//! Loads named payload resources and applies ordered edits to them. A payload
//! is either raw text or a JSON document; edits are described by
//! `(locator, operation, argument)` specs, usually read from a fixture table.

pub mod error;
pub mod loader;
pub mod models;
pub mod mutation;
pub mod mutator;
pub mod path;

pub use error::{LoadError, MutationError, MutationFailure};
pub use loader::{load_payload, load_with, parse_json, FsLoader, ResourceLoader};
pub use models::{Payload, PayloadKind};
pub use mutation::{MutationSpec, Operation, REPLACE_SEPARATOR};
pub use mutator::{apply, apply_rows, apply_spec};
pub use path::{JsonPath, PathError, PathSegment};
