//! Fixture parameterization for test runners
//!
//! This crate rewrites test input before it is consumed. It has two halves:
//!
//! - **Placeholder resolution**: `${name}` reads a process property (with an
//!   optional `.toLower` / `.toUpper` modifier), `!{key}` reads the runtime
//!   registry, and `@{IP.eth0}` evaluates a capability such as the first IPv4
//!   address of a network interface.
//! - **Payload mutation**: an ordered list of `(locator, operation, argument)`
//!   edits applied to a raw string or a JSON document.
//!
//! # Architecture
//!
//! - **config**: global settings (resource directory, substitution limit,
//!   in-process properties)
//! - **registry**: the runtime key-value store read by `!{...}` placeholders
//! - **placeholder**: grammar and resolver for the three placeholder domains
//! - **step**: step records and the rewriter applied before dispatch
//! - **payload**: resource loading, path expressions and the mutation engine
//! - **failure**: deferred failure collection for runners that keep going
//!
//! # Usage
//!
//! ```
//! use fixture_params::payload::{apply_rows, Payload};
//! use fixture_params::{Registry, Resolver};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! registry.set("suffix", "Append");
//! let resolver = Resolver::new().with_registry(registry);
//!
//! let argument = resolver.resolve("!{suffix}").unwrap();
//! let payload = Payload::Json(json!({"key1": "value1", "key2": {"key3": "value3"}}));
//! let rows = vec![
//!     vec!["key1".to_string(), "DELETE".to_string(), "N/A".to_string()],
//!     vec!["key2.key3".to_string(), "APPEND".to_string(), argument],
//! ];
//!
//! let result = apply_rows(&payload, rows).unwrap();
//! assert_eq!(result.render(), r#"{"key2":{"key3":"value3Append"}}"#);
//! ```

pub mod config;
pub mod error;
pub mod failure;
pub mod payload;
pub mod placeholder;
pub mod registry;
pub mod step;

pub use config::{get_config, load_config, reset_config, update_config, FixtureConfig};
pub use error::{FixtureError, Result};
pub use failure::FailureLog;
pub use payload::{
    apply, apply_rows, load_payload, FsLoader, LoadError, MutationError, MutationFailure,
    MutationSpec, Operation, Payload, PayloadKind, ResourceLoader,
};
pub use placeholder::{resolve, ResolutionError, Resolver};
pub use registry::{CaptureError, Registry};
pub use step::{Step, StepRewriter};
