//! Placeholder module
//!
//! This module resolves the three placeholder forms used in fixture text:
//! `${...}` for process properties, `!{...}` for runtime registry values and
//! `@{...}` for code-evaluated capabilities such as interface addresses.

pub mod error;
pub mod grammar;
pub mod network;
pub mod properties;
pub mod resolver;

pub use error::ResolutionError;
pub use grammar::{contains_marker, find_first, CaseModifier, Domain, Occurrence, Placeholder};
pub use network::{InterfaceLookup, StaticInterfaces, SystemInterfaces};
pub use properties::{PropertySource, SystemProperties};
pub use resolver::{resolve, Resolver};
