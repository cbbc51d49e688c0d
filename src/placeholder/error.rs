//! Error types for placeholder resolution.

use thiserror::Error;

/// Errors that can occur while resolving placeholders.
///
/// Resolution is all-or-nothing: any of these aborts the call and no
/// partially substituted text is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The placeholder does not start with `${`, `!{` or `@{`.
    #[error("Unknown placeholder domain: {0}")]
    UnknownDomain(String),

    /// A marker was found with no closing `}` after it.
    #[error("Unterminated placeholder starting with '{marker}' in: {text}")]
    Unterminated { marker: String, text: String },

    /// A `@{...}` placeholder has no `.argument` part.
    #[error("Interface not defined in placeholder: {0}")]
    MissingArgument(String),

    /// The named network interface does not exist.
    #[error("Interface {0} not available")]
    InterfaceUnavailable(String),

    /// The named network interface exists but has no IPv4 address bound.
    #[error("Interface {0} has no IPv4 address")]
    NoIpv4Address(String),

    /// A `@{...}` capability other than `IP`.
    #[error("Property not defined: {0}")]
    UnknownCapability(String),

    /// A `!{key}` placeholder whose key is absent from the registry.
    #[error("Key not found in registry: {0}")]
    MissingKey(String),

    /// More substitutions were needed than the configured limit allows.
    #[error("Substitution limit of {0} exceeded, placeholder values may reference themselves")]
    SubstitutionLimit(usize),
}
