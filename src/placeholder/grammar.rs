//! Placeholder grammar.
//!
//! Three markers open a placeholder, one per lookup domain:
//!
//! | Marker | Domain | Interior |
//! |---|---|---|
//! | `${` | [`Domain::Env`] | `name` or `name.toLower` / `name.toUpper` |
//! | `!{` | [`Domain::Thread`] | registry key, taken verbatim |
//! | `@{` | [`Domain::Code`] | `capability.argument`, e.g. `IP.eth0` |
//!
//! A placeholder ends at the first `}` after its marker, so interiors never
//! contain a literal `}`.

use super::ResolutionError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::Range;

static ENV_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").expect("Failed to compile env placeholder regex"));

static THREAD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\{([^}]*)\}").expect("Failed to compile thread placeholder regex"));

static CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\{([^}]*)\}").expect("Failed to compile code placeholder regex"));

/// Lookup domain of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// `${...}`: process properties and environment
    Env,
    /// `!{...}`: runtime registry
    Thread,
    /// `@{...}`: code-evaluated capability
    Code,
}

impl Domain {
    /// Domains in the order their passes run.
    pub const ALL: [Domain; 3] = [Domain::Env, Domain::Thread, Domain::Code];

    /// The two-character marker opening this domain's placeholders.
    pub fn marker(self) -> &'static str {
        match self {
            Domain::Env => "${",
            Domain::Thread => "!{",
            Domain::Code => "@{",
        }
    }

    /// Maps a marker sigil (`$`, `!`, `@`) to its domain.
    pub fn from_sigil(sigil: char) -> Option<Domain> {
        match sigil {
            '$' => Some(Domain::Env),
            '!' => Some(Domain::Thread),
            '@' => Some(Domain::Code),
            _ => None,
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Domain::Env => &ENV_REGEX,
            Domain::Thread => &THREAD_REGEX,
            Domain::Code => &CODE_REGEX,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Env => "env",
            Domain::Thread => "thread",
            Domain::Code => "code",
        };
        f.write_str(name)
    }
}

/// Case folding applied to an env-domain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseModifier {
    None,
    Lower,
    Upper,
}

impl CaseModifier {
    /// Unrecognized modifier text folds to [`CaseModifier::None`].
    pub fn parse(modifier: Option<&str>) -> Self {
        match modifier {
            Some("toLower") => CaseModifier::Lower,
            Some("toUpper") => CaseModifier::Upper,
            _ => CaseModifier::None,
        }
    }

    pub fn apply(self, value: String) -> String {
        match self {
            CaseModifier::None => value,
            CaseModifier::Lower => value.to_lowercase(),
            CaseModifier::Upper => value.to_uppercase(),
        }
    }
}

/// A single parsed placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub domain: Domain,

    /// Property name, registry key, or capability name
    pub token: String,

    /// Case modifier (env) or capability argument (code)
    pub modifier: Option<String>,
}

impl Placeholder {
    /// Parses a complete placeholder such as `${HOST.toLower}` or `@{IP.eth0}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_params::placeholder::{Domain, Placeholder};
    ///
    /// let p = Placeholder::parse("@{IP.eth0}").unwrap();
    /// assert_eq!(p.domain, Domain::Code);
    /// assert_eq!(p.token, "IP");
    /// assert_eq!(p.modifier.as_deref(), Some("eth0"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ResolutionError> {
        let mut chars = text.chars();
        let domain = match (chars.next(), chars.next()) {
            (Some(sigil), Some('{')) => Domain::from_sigil(sigil),
            _ => None,
        }
        .ok_or_else(|| ResolutionError::UnknownDomain(text.to_string()))?;

        let interior = text[2..]
            .strip_suffix('}')
            .ok_or_else(|| ResolutionError::Unterminated {
                marker: domain.marker().to_string(),
                text: text.to_string(),
            })?;

        Self::from_interior(domain, interior)
    }

    /// Builds a placeholder from a domain and the text between the braces.
    pub fn from_interior(domain: Domain, interior: &str) -> Result<Self, ResolutionError> {
        match domain {
            Domain::Env => {
                let (token, modifier) = match interior.split_once('.') {
                    Some((name, modifier)) => (name, Some(modifier.to_string())),
                    None => (interior, None),
                };
                Ok(Self {
                    domain,
                    token: token.to_string(),
                    modifier,
                })
            }
            Domain::Thread => Ok(Self {
                domain,
                token: interior.to_string(),
                modifier: None,
            }),
            Domain::Code => {
                let (capability, argument) = interior.split_once('.').ok_or_else(|| {
                    ResolutionError::MissingArgument(format!("@{{{}}}", interior))
                })?;
                Ok(Self {
                    domain,
                    token: capability.to_string(),
                    modifier: Some(argument.to_string()),
                })
            }
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.modifier {
            Some(modifier) => write!(f, "{}{}.{}}}", self.domain.marker(), self.token, modifier),
            None => write!(f, "{}{}}}", self.domain.marker(), self.token),
        }
    }
}

/// Location of the first placeholder of one domain inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Byte range of the whole placeholder, braces included
    pub span: Range<usize>,
    pub placeholder: Placeholder,
}

/// Finds the first placeholder of `domain` in `text`.
///
/// Returns `Ok(None)` when the text holds no marker of this domain and an
/// error when a marker is left without a closing brace.
pub fn find_first(text: &str, domain: Domain) -> Result<Option<Occurrence>, ResolutionError> {
    let marker = domain.marker();
    let Some(start) = text.find(marker) else {
        return Ok(None);
    };

    let captures = domain
        .regex()
        .captures_at(text, start)
        .ok_or_else(|| ResolutionError::Unterminated {
            marker: marker.to_string(),
            text: text.to_string(),
        })?;

    let (Some(whole), Some(interior)) = (captures.get(0), captures.get(1)) else {
        return Ok(None);
    };

    Ok(Some(Occurrence {
        span: whole.range(),
        placeholder: Placeholder::from_interior(domain, interior.as_str())?,
    }))
}

/// Whether `text` contains any placeholder marker.
pub fn contains_marker(text: &str) -> bool {
    Domain::ALL.iter().any(|d| text.contains(d.marker()))
}
