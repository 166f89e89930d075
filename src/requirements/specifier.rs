//! Version specifiers and specifier sets.
//!
//! A [`SpecifierSet`] is a comma-separated conjunction such as `>=1.2,<2.0`.
//! Matching follows the packaging specifier rules, including the
//! pre-release exclusion policy: a set only admits pre-release candidates
//! when one of its inclusive specifiers names a pre-release itself.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::version::{Number, Version};
use crate::error::{EnvCheckError, Result};

fn specifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(~=|===|==|!=|<=|>=|<|>)\s*([^\s,;]+)\s*$")
            .expect("specifier pattern is valid")
    })
}

/// Comparison operator of a single specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `~=`
    Compatible,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `===`
    Arbitrary,
}

impl Operator {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "~=" => Self::Compatible,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<=" => Self::LessEqual,
            ">=" => Self::GreaterEqual,
            "<" => Self::Less,
            ">" => Self::Greater,
            "===" => Self::Arbitrary,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compatible => "~=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Arbitrary => "===",
        }
    }
}

/// A single `operator version` clause.
#[derive(Debug, Clone)]
pub struct Specifier {
    operator: Operator,
    /// Version text as written, without any `.*` suffix.
    text: String,
    /// Parsed version; `None` only for `===` with a non-standard string.
    version: Option<Version>,
    wildcard: bool,
}

impl Specifier {
    /// Parse one specifier clause, e.g. `>=1.2` or `==3.*`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |message: &str| EnvCheckError::InvalidSpecifier {
            input: input.trim().to_string(),
            message: message.to_string(),
        };

        let caps = specifier_regex()
            .captures(input)
            .ok_or_else(|| invalid("expected an operator followed by a version"))?;
        let operator =
            Operator::from_token(&caps[1]).ok_or_else(|| invalid("unknown operator"))?;
        let raw = caps[2].to_string();

        if operator == Operator::Arbitrary {
            let version = Version::parse(&raw).ok();
            return Ok(Self {
                operator,
                text: raw,
                version,
                wildcard: false,
            });
        }

        let (text, wildcard) = match raw.strip_suffix(".*") {
            Some(prefix) => (prefix.to_string(), true),
            None => (raw, false),
        };

        let version =
            Version::parse(&text).map_err(|_| invalid(&format!("'{text}' is not a valid version")))?;

        match operator {
            Operator::Equal | Operator::NotEqual => {
                if wildcard
                    && (version.pre().is_some()
                        || version.post().is_some()
                        || version.dev().is_some()
                        || version.local().is_some())
                {
                    return Err(invalid("prefix matching only accepts release segments"));
                }
            }
            _ if wildcard => {
                return Err(invalid("'.*' is only allowed with == and !="));
            }
            _ if version.local().is_some() => {
                return Err(invalid("local versions are only allowed with == and !="));
            }
            Operator::Compatible if version.release().len() < 2 => {
                return Err(invalid("~= requires at least two release segments"));
            }
            _ => {}
        }

        Ok(Self {
            operator,
            text,
            version: Some(version),
            wildcard,
        })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Version text as written, without any `.*` suffix.
    pub fn version_text(&self) -> &str {
        &self.text
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Whether this clause explicitly opts into pre-release candidates.
    pub fn allows_prereleases(&self) -> bool {
        match self.operator {
            Operator::NotEqual => false,
            _ => self.version.as_ref().is_some_and(Version::is_prerelease),
        }
    }

    /// Test a candidate version against this clause alone.
    ///
    /// Pre-release filtering is the set's job; see [`SpecifierSet::contains`].
    pub fn contains(&self, candidate: &Version) -> bool {
        let Some(spec) = &self.version else {
            return self.arbitrary_matches(&candidate.to_string());
        };

        match self.operator {
            Operator::Compatible => {
                let prefix_len = if spec.pre().is_some() {
                    spec.release().len()
                } else {
                    spec.release().len() - 1
                };
                candidate.public() >= *spec
                    && prefix_matches(candidate, spec.epoch(), &spec.release()[..prefix_len])
            }
            Operator::Equal => self.equals(candidate, spec),
            Operator::NotEqual => !self.equals(candidate, spec),
            Operator::LessEqual => candidate.public() <= *spec,
            Operator::GreaterEqual => candidate.public() >= *spec,
            Operator::Less => {
                candidate < spec
                    && !(!spec.is_prerelease()
                        && candidate.is_prerelease()
                        && candidate.base() == spec.base())
            }
            Operator::Greater => {
                if candidate <= spec {
                    return false;
                }
                if !spec.is_postrelease()
                    && candidate.is_postrelease()
                    && candidate.base() == spec.base()
                {
                    return false;
                }
                !(candidate.local().is_some() && candidate.base() == spec.base())
            }
            Operator::Arbitrary => self.arbitrary_matches(&candidate.to_string()),
        }
    }

    fn equals(&self, candidate: &Version, spec: &Version) -> bool {
        if self.wildcard {
            prefix_matches(candidate, spec.epoch(), spec.release())
        } else if spec.local().is_some() {
            candidate == spec
        } else {
            candidate.public() == *spec
        }
    }

    /// `===` compares strings, case-insensitively.
    pub fn arbitrary_matches(&self, raw: &str) -> bool {
        self.operator == Operator::Arbitrary && raw.trim().eq_ignore_ascii_case(&self.text)
    }
}

/// `==E!P.*` semantics: same epoch, and the candidate's release padded with
/// zeros starts with `prefix`.
fn prefix_matches(candidate: &Version, epoch: &Number, prefix: &[Number]) -> bool {
    if candidate.epoch() != epoch {
        return false;
    }
    let release = candidate.release();
    prefix
        .iter()
        .enumerate()
        .all(|(i, part)| release.get(i).map_or(part.is_zero(), |n| n == part))
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.as_str(), self.text)?;
        if self.wildcard {
            write!(f, ".*")?;
        }
        Ok(())
    }
}

impl FromStr for Specifier {
    type Err = EnvCheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A conjunction of specifiers. The empty set matches every version.
#[derive(Debug, Clone, Default)]
pub struct SpecifierSet {
    specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    /// Parse a comma-separated specifier list. Blank input yields the empty set.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let specifiers = input
            .split(',')
            .map(Specifier::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { specifiers })
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specifier> {
        self.specifiers.iter()
    }

    pub fn allows_prereleases(&self) -> bool {
        self.specifiers.iter().any(Specifier::allows_prereleases)
    }

    /// Test a parsed version against every clause.
    ///
    /// An empty set admits anything, pre-releases included.
    pub fn contains(&self, version: &Version) -> bool {
        if self.is_empty() {
            return true;
        }
        if version.is_prerelease() && !self.allows_prereleases() {
            return false;
        }
        self.specifiers.iter().all(|s| s.contains(version))
    }

    /// Test an installed version string.
    ///
    /// Strings that do not parse as versions only match through `===`
    /// clauses (or an empty set).
    pub fn contains_str(&self, raw: &str) -> bool {
        match Version::parse(raw) {
            Ok(version) => self.contains(&version),
            Err(_) => {
                self.is_empty() || self.specifiers.iter().all(|s| s.arbitrary_matches(raw))
            }
        }
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.specifiers.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for SpecifierSet {
    type Err = EnvCheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> SpecifierSet {
        SpecifierSet::parse(s).unwrap()
    }

    fn matches(spec: &str, version: &str) -> bool {
        set(spec).contains_str(version)
    }

    #[test]
    fn empty_set_matches_everything() {
        assert!(matches("", "0.0.1"));
        assert!(matches("", "3.0.0rc1"));
        assert!(matches("", "not-a-version"));
    }

    #[test]
    fn range_conjunction() {
        assert!(matches(">=2.0,<3.0", "2.28.0"));
        assert!(!matches(">=2.0,<3.0", "1.9.0"));
        assert!(!matches(">=2.0,<3.0", "3.0"));
        assert!(matches(" >= 2.0 , < 3.0 ", "2.0"));
    }

    #[test]
    fn equality_ignores_trailing_zeros_and_candidate_local() {
        assert!(matches("==2.0.0", "2.0"));
        assert!(matches("==1.0", "1.0+cpu"));
        assert!(!matches("==1.0+cpu", "1.0+gpu"));
        assert!(matches("==1.0+cpu", "1.0+cpu"));
        assert!(!matches("!=1.0", "1.0.0"));
        assert!(matches("!=1.0", "1.0.1"));
    }

    #[test]
    fn prefix_matching() {
        assert!(matches("==1.4.*", "1.4.5"));
        assert!(matches("==1.4.*", "1.4"));
        assert!(!matches("==1.4.*", "1.5.0"));
        assert!(matches("!=1.4.*", "1.5.0"));
        assert!(!matches("==1.*", "1!1.0"));
    }

    #[test]
    fn compatible_release() {
        assert!(matches("~=2.2", "2.3"));
        assert!(!matches("~=2.2", "3.0"));
        assert!(!matches("~=2.2", "2.1"));
        assert!(matches("~=1.4.5", "1.4.9"));
        assert!(!matches("~=1.4.5", "1.5.0"));
        assert!(matches("~=2.2.post3", "2.3"));
    }

    #[test]
    fn exclusive_less_than_skips_prereleases_of_bound() {
        assert!(!matches("<3.0", "3.0.dev1"));
        assert!(matches("<3.0rc1", "3.0b2"));
    }

    #[test]
    fn exclusive_greater_than_skips_post_and_local_of_bound() {
        assert!(!matches(">1.7", "1.7.post2"));
        assert!(matches(">1.7.post2", "1.7.post3"));
        assert!(!matches(">1.7", "1.7+local"));
        assert!(matches(">1.7", "1.7.1"));
    }

    #[test]
    fn prereleases_excluded_unless_requested() {
        assert!(!matches(">=1.0", "2.0b1"));
        assert!(matches(">=1.0b1", "2.0b1"));
        assert!(!matches("!=1.0b1", "2.0b1"));
        assert!(!matches(">=1.0", "1.5.dev0"));
    }

    #[test]
    fn arbitrary_equality_compares_strings() {
        assert!(matches("===foobar", "FooBar"));
        assert!(!matches("===1.0", "1.0.0"));
        assert!(matches("===1.0", "1.0"));
    }

    #[test]
    fn invalid_installed_version_never_satisfies_ordered_specifiers() {
        assert!(!matches(">=1.0", "1.0-custom-build"));
    }

    #[test]
    fn rejects_malformed_specifiers() {
        for input in [">=", "=>1.0", "~=1", ">=1.0.*", "<1.0+local", ">=1.0,,<2", "==1.0a1.*"] {
            assert!(SpecifierSet::parse(input).is_err(), "{input} should fail");
        }
    }

    #[test]
    fn display_round_trips_text() {
        assert_eq!(set(">=1.2, <2.0").to_string(), ">=1.2,<2.0");
        assert_eq!(set("==3.*").to_string(), "==3.*");
    }

    #[test]
    fn very_large_segments_compare_numerically() {
        assert!(matches(">=1.0", "99999999999999999999.0"));
        assert!(!matches("<18446744073709551616", "18446744073709551617"));
        assert!(matches("==99999999999999999999.*", "99999999999999999999.3"));
        assert!(matches("~=1.99999999999999999999", "1.100000000000000000000"));
    }
}
