//! Requirement line parsing.
//!
//! Grammar: `name[extra,...] (specifiers | "(" specifiers ")" | "@" url) [; marker]`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::specifier::SpecifierSet;
use crate::error::{EnvCheckError, Result};

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?").expect("name pattern is valid")
    })
}

fn extra_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$")
            .expect("extra pattern is valid")
    })
}

/// A parsed requirement line.
#[derive(Debug, Clone)]
pub struct Requirement {
    name: String,
    extras: Vec<String>,
    specifier: SpecifierSet,
    url: Option<String>,
    marker: Option<String>,
    source: String,
}

impl Requirement {
    /// Parse a single requirement such as `requests[socks]>=2.0,<3.0`.
    pub fn parse(input: &str) -> Result<Self> {
        let source = input.trim().to_string();
        let invalid = |message: String| EnvCheckError::InvalidRequirement {
            input: source.clone(),
            message,
        };

        let name = name_regex()
            .find(&source)
            .ok_or_else(|| invalid("expected package name".to_string()))?
            .as_str()
            .to_string();
        let mut rest = source[name.len()..].trim_start();

        let mut extras = Vec::new();
        if let Some(after) = rest.strip_prefix('[') {
            let close = after
                .find(']')
                .ok_or_else(|| invalid("unclosed extras bracket".to_string()))?;
            for extra in after[..close].split(',').map(str::trim) {
                if extra.is_empty() {
                    continue;
                }
                if !extra_regex().is_match(extra) {
                    return Err(invalid(format!("invalid extra '{extra}'")));
                }
                extras.push(extra.to_string());
            }
            rest = after[close + 1..].trim_start();
        }

        let mut url = None;
        let spec_text;
        if let Some(after) = rest.strip_prefix('@') {
            let after = after.trim_start();
            let end = after.find(char::is_whitespace).unwrap_or(after.len());
            if end == 0 {
                return Err(invalid("expected URL after '@'".to_string()));
            }
            url = Some(after[..end].to_string());
            spec_text = "";
            rest = after[end..].trim_start();
        } else {
            let end = rest.find(';').unwrap_or(rest.len());
            let (spec, tail) = rest.split_at(end);
            spec_text = spec.trim();
            rest = tail;
        }

        let spec_text = match spec_text.strip_prefix('(') {
            Some(inner) => inner
                .strip_suffix(')')
                .ok_or_else(|| invalid("unclosed parenthesis".to_string()))?,
            None => spec_text,
        };
        let specifier = SpecifierSet::parse(spec_text).map_err(|e| invalid(e.to_string()))?;

        let marker = match rest.strip_prefix(';') {
            Some(marker) if marker.trim().is_empty() => {
                return Err(invalid("empty environment marker".to_string()));
            }
            Some(marker) => Some(marker.trim().to_string()),
            None if rest.is_empty() => None,
            None => return Err(invalid(format!("unexpected text '{rest}'"))),
        };

        Ok(Self {
            name,
            extras,
            specifier,
            url,
            marker,
            source,
        })
    }

    /// Package name exactly as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    pub fn specifier(&self) -> &SpecifierSet {
        &self.specifier
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Environment marker text. Not evaluated.
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// The trimmed line this requirement was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether an installed version string satisfies the constraint.
    pub fn is_satisfied_by(&self, installed: &str) -> bool {
        self.specifier.contains_str(installed)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl FromStr for Requirement {
    type Err = EnvCheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
