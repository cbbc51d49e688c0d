//! Placeholder resolution engine.
//!
//! Replaces `${...}`, `!{...}` and `@{...}` placeholders in fixture text with
//! concrete values. Each domain is processed in its own pass, in the fixed
//! order env, thread, code, and each pass runs until no placeholder of its
//! domain is left. A value that introduces new placeholder text is picked up by
//! a later pass; if a marker of an earlier domain remains after the code pass,
//! the three passes run again.

use super::grammar::{contains_marker, find_first, CaseModifier, Domain, Placeholder};
use super::network::{InterfaceLookup, SystemInterfaces};
use super::properties::{PropertySource, SystemProperties};
use super::ResolutionError;
use crate::config::get_config;
use crate::registry::Registry;
use log::debug;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// The only capability defined for `@{...}` placeholders.
const IP_CAPABILITY: &str = "IP";

/// Resolves placeholders against injected lookup sources.
///
/// Cloning is cheap; clones share their sources and registry.
#[derive(Clone)]
pub struct Resolver {
    properties: Arc<dyn PropertySource>,
    registry: Registry,
    interfaces: Arc<dyn InterfaceLookup>,
    max_substitutions: usize,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("registry_len", &self.registry.len())
            .field("max_substitutions", &self.max_substitutions)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Creates a resolver over the process environment, the global registry
    /// and the OS interface table, configured from the global configuration.
    pub fn new() -> Self {
        let config = get_config();
        Self {
            properties: Arc::new(SystemProperties::with_overrides(config.properties)),
            registry: Registry::global(),
            interfaces: Arc::new(SystemInterfaces),
            max_substitutions: config.max_substitutions,
        }
    }

    /// Replaces the source for `${...}` lookups.
    pub fn with_properties(mut self, properties: impl PropertySource + 'static) -> Self {
        self.properties = Arc::new(properties);
        self
    }

    /// Replaces the registry for `!{...}` lookups.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the interface table for `@{IP.<interface>}` lookups.
    pub fn with_interfaces(mut self, interfaces: impl InterfaceLookup + 'static) -> Self {
        self.interfaces = Arc::new(interfaces);
        self
    }

    pub fn with_max_substitutions(mut self, max_substitutions: usize) -> Self {
        self.max_substitutions = max_substitutions;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolves every placeholder in `text`.
    ///
    /// Text without placeholder markers is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_params::{Registry, Resolver};
    /// use std::collections::HashMap;
    ///
    /// let mut props = HashMap::new();
    /// props.insert("ENV".to_string(), "qa".to_string());
    ///
    /// let registry = Registry::new();
    /// registry.set("userId", "42");
    ///
    /// let resolver = Resolver::new()
    ///     .with_properties(props)
    ///     .with_registry(registry);
    ///
    /// let text = resolver.resolve("GET /${ENV.toUpper}/users/!{userId}").unwrap();
    /// assert_eq!(text, "GET /QA/users/42");
    /// ```
    pub fn resolve(&self, text: &str) -> Result<String, ResolutionError> {
        if !contains_marker(text) {
            return Ok(text.to_string());
        }

        let mut value = text.to_string();
        let mut substitutions = 0;

        while contains_marker(&value) {
            for domain in Domain::ALL {
                while let Some(occurrence) = find_first(&value, domain)? {
                    if substitutions >= self.max_substitutions {
                        return Err(ResolutionError::SubstitutionLimit(self.max_substitutions));
                    }

                    let replacement = self.lookup(&occurrence.placeholder)?;
                    debug!("Resolved {} to '{}'", occurrence.placeholder, replacement);

                    value.replace_range(occurrence.span, &replacement);
                    substitutions += 1;
                }
            }
        }

        Ok(value)
    }

    /// Resolves a single parsed placeholder to its value.
    pub fn lookup(&self, placeholder: &Placeholder) -> Result<String, ResolutionError> {
        match placeholder.domain {
            Domain::Env => {
                let value = self
                    .properties
                    .property(&placeholder.token)
                    .unwrap_or_default();
                Ok(CaseModifier::parse(placeholder.modifier.as_deref()).apply(value))
            }
            Domain::Thread => self
                .registry
                .get(&placeholder.token)
                .ok_or_else(|| ResolutionError::MissingKey(placeholder.token.clone())),
            Domain::Code => {
                let argument = placeholder
                    .modifier
                    .as_deref()
                    .ok_or_else(|| ResolutionError::MissingArgument(placeholder.to_string()))?;

                match placeholder.token.as_str() {
                    IP_CAPABILITY => self.interface_ipv4(argument),
                    other => Err(ResolutionError::UnknownCapability(other.to_string())),
                }
            }
        }
    }

    /// First IPv4 address bound to `interface`.
    fn interface_ipv4(&self, interface: &str) -> Result<String, ResolutionError> {
        let addresses = self
            .interfaces
            .addresses(interface)
            .ok_or_else(|| ResolutionError::InterfaceUnavailable(interface.to_string()))?;

        addresses
            .iter()
            .find_map(|addr| match addr {
                IpAddr::V4(v4) => Some(v4.to_string()),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| ResolutionError::NoIpv4Address(interface.to_string()))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `text` with a default [`Resolver`].
pub fn resolve(text: &str) -> Result<String, ResolutionError> {
    Resolver::new().resolve(text)
}
