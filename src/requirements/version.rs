//! Package version parsing and ordering.
//!
//! Versions follow the Python packaging version scheme:
//! `[N!]N(.N)*[{a|b|rc}N][.postN][.devN][+local]`, including the alternate
//! spellings pip accepts (`alpha`, `beta`, `c`, `pre`, `preview`, `rev`, `r`,
//! `-N` post releases, `-`/`_`/`.` separators and a leading `v`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{EnvCheckError, Result};

const VERSION_PATTERN: &str = r"(?ix)
    ^\s*v?
    (?:(?P<epoch>[0-9]+)!)?
    (?P<release>[0-9]+(?:\.[0-9]+)*)
    (?P<pre>
        [-_.]?
        (?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)
        [-_.]?
        (?P<pre_n>[0-9]+)?
    )?
    (?P<post>
        (?:-(?P<post_n1>[0-9]+))
        |
        (?:
            [-_.]?
            (?P<post_l>post|rev|r)
            [-_.]?
            (?P<post_n2>[0-9]+)?
        )
    )?
    (?P<dev>
        [-_.]?
        (?P<dev_l>dev)
        [-_.]?
        (?P<dev_n>[0-9]+)?
    )?
    (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
    \s*$
";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

/// Pre-release phase, ordered alpha < beta < release candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha,
    Beta,
    Rc,
}

impl PreRelease {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Self::Alpha,
            "b" | "beta" => Self::Beta,
            _ => Self::Rc,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::Rc => "rc",
        }
    }
}

/// A non-negative integer of any size, kept as its decimal digits.
///
/// Version segments are unbounded, so they are compared by digit count and
/// then lexically instead of being parsed into a machine integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Build from ASCII digits; leading zeros are dropped.
    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self::zero()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One dot-separated segment of a local version label.
///
/// Alphanumeric segments sort before numeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    Text(String),
    Number(Number),
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A parsed package version.
#[derive(Debug, Clone)]
pub struct Version {
    epoch: Number,
    release: Vec<Number>,
    pre: Option<(PreRelease, Number)>,
    post: Option<Number>,
    dev: Option<Number>,
    local: Option<Vec<LocalSegment>>,
}

impl Version {
    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || EnvCheckError::InvalidVersion {
            input: input.to_string(),
        };
        let caps = version_regex().captures(input).ok_or_else(invalid)?;

        // Implicit numbers (`1.0rc`, `1.0.post`) are zero.
        let number = |name: &str| -> Number {
            caps.name(name)
                .map_or_else(Number::zero, |m| Number::from_digits(m.as_str()))
        };

        let epoch = number("epoch");

        let release = caps["release"].split('.').map(Number::from_digits).collect();

        let pre = caps
            .name("pre_l")
            .map(|label| (PreRelease::from_label(label.as_str()), number("pre_n")));

        let post = caps.name("post").map(|_| {
            if caps.name("post_n1").is_some() {
                number("post_n1")
            } else {
                number("post_n2")
            }
        });

        let dev = caps.name("dev").map(|_| number("dev_n"));

        let local = caps.name("local").map(|m| {
            m.as_str()
                .split(['.', '-', '_'])
                .map(|seg| {
                    if seg.bytes().all(|b| b.is_ascii_digit()) {
                        LocalSegment::Number(Number::from_digits(seg))
                    } else {
                        LocalSegment::Text(seg.to_ascii_lowercase())
                    }
                })
                .collect()
        });

        Ok(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    pub fn epoch(&self) -> &Number {
        &self.epoch
    }

    pub fn release(&self) -> &[Number] {
        &self.release
    }

    pub fn pre(&self) -> Option<(PreRelease, &Number)> {
        self.pre.as_ref().map(|(phase, n)| (*phase, n))
    }

    pub fn post(&self) -> Option<&Number> {
        self.post.as_ref()
    }

    pub fn dev(&self) -> Option<&Number> {
        self.dev.as_ref()
    }

    pub fn local(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    /// Pre-releases and dev releases are both treated as pre-releases.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    /// The version without its local label.
    pub fn public(&self) -> Version {
        Version {
            local: None,
            ..self.clone()
        }
    }

    /// Epoch and release only.
    pub fn base(&self) -> Version {
        Version {
            epoch: self.epoch.clone(),
            release: self.release.clone(),
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    fn trimmed_release(&self) -> &[Number] {
        let end = self
            .release
            .iter()
            .rposition(|n| !n.is_zero())
            .map_or(0, |i| i + 1);
        &self.release[..end]
    }

    fn pre_key(&self) -> PreKey<'_> {
        match (&self.pre, &self.post, &self.dev) {
            (None, None, Some(_)) => PreKey::DevOnly,
            (None, _, _) => PreKey::Final,
            (Some((phase, n)), _, _) => PreKey::Pre(*phase, n),
        }
    }

    fn dev_key(&self) -> DevKey<'_> {
        match &self.dev {
            Some(n) => DevKey::Dev(n),
            None => DevKey::Final,
        }
    }
}

// Sort keys. Variant order encodes the negative/positive infinities.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey<'a> {
    DevOnly,
    Pre(PreRelease, &'a Number),
    Final,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey<'a> {
    Dev(&'a Number),
    Final,
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = EnvCheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders the normalized form, e.g. `1!2.0rc1.post2.dev3+ubuntu.1`.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.epoch.is_zero() {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(Number::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((phase, n)) = &self.pre {
            write!(f, "{}{}", phase.as_str(), n)?;
        }
        if let Some(n) = &self.post {
            write!(f, ".post{n}")?;
        }
        if let Some(n) = &self.dev {
            write!(f, ".dev{n}")?;
        }
        if let Some(local) = &self.local {
            let segments: Vec<String> = local.iter().map(ToString::to_string).collect();
            write!(f, "+{}", segments.join("."))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn nums(ns: &[u64]) -> Vec<Number> {
        ns.iter().copied().map(Number::from).collect()
    }

    #[test]
    fn parses_plain_release() {
        let version = v("2.28.0");
        assert_eq!(version.release(), nums(&[2, 28, 0]).as_slice());
        assert!(version.epoch().is_zero());
        assert!(!version.is_prerelease());
    }

    #[test]
    fn parses_full_form() {
        let version = v("1!2.0rc1.post2.dev3+ubuntu.1");
        assert_eq!(version.epoch(), &Number::from(1));
        assert_eq!(version.pre(), Some((PreRelease::Rc, &Number::from(1))));
        assert_eq!(version.post(), Some(&Number::from(2)));
        assert_eq!(version.dev(), Some(&Number::from(3)));
        assert_eq!(
            version.local(),
            Some(
                &[
                    LocalSegment::Text("ubuntu".to_string()),
                    LocalSegment::Number(Number::from(1))
                ][..]
            )
        );
    }

    #[test]
    fn normalizes_alternate_spellings() {
        assert_eq!(v("1.0alpha1").to_string(), "1.0a1");
        assert_eq!(v("1.0-beta.2").to_string(), "1.0b2");
        assert_eq!(v("1.0c3").to_string(), "1.0rc3");
        assert_eq!(v("1.0preview").to_string(), "1.0rc0");
        assert_eq!(v("1.0-1").to_string(), "1.0.post1");
        assert_eq!(v("1.0rev4").to_string(), "1.0.post4");
        assert_eq!(v("v1.0.DEV").to_string(), "1.0.dev0");
        assert_eq!(v("1.0+Ubuntu-1").to_string(), "1.0+ubuntu.1");
    }

    #[test]
    fn rejects_invalid_versions() {
        for input in ["", "abc", "1.0-custom-build", "1..0", "1.0+", "==1.0"] {
            assert!(Version::parse(input).is_err(), "{input} should be invalid");
        }
    }

    #[test]
    fn trailing_zeros_compare_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("2"), v("2.0.0.0"));
        assert!(v("1.0.1") > v("1.0"));
    }

    #[test]
    fn orders_release_phases() {
        let ordered = [
            "1.0.dev0",
            "1.0a1.dev1",
            "1.0a1",
            "1.0b1",
            "1.0rc1",
            "1.0",
            "1.0+local",
            "1.0.post1.dev0",
            "1.0.post1",
            "1.1.dev0",
        ];
        for pair in ordered.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn epoch_dominates_release() {
        assert!(v("1!1.0") > v("2024.1"));
    }

    #[test]
    fn numeric_local_segments_sort_after_text() {
        assert!(v("1.0+abc") < v("1.0+1"));
        assert!(v("1.0+1") < v("1.0+1.1"));
    }

    #[test]
    fn public_and_base_strip_labels() {
        let version = v("1.2.3rc1.post1+local");
        assert_eq!(version.public().to_string(), "1.2.3rc1.post1");
        assert_eq!(version.base().to_string(), "1.2.3");
    }

    #[test]
    fn dev_release_counts_as_prerelease() {
        assert!(v("1.0.dev1").is_prerelease());
        assert!(v("1.0.dev1").is_devrelease());
        assert!(!v("1.0.post1").is_prerelease());
        assert!(v("1.0.post1").is_postrelease());
    }

    #[test]
    fn leading_zeros_are_insignificant() {
        assert_eq!(v("01.002"), v("1.2"));
        assert_eq!(v("1.0rc01").to_string(), "1.0rc1");
        assert_eq!(v("1.0+build.007").to_string(), "1.0+build.7");
    }

    #[test]
    fn segments_wider_than_machine_integers() {
        let huge = v("99999999999999999999.0");
        assert_eq!(huge.to_string(), "99999999999999999999.0");
        assert!(huge > v("18446744073709551615.0"));
        assert!(v("1.0.post123456789012345678901234567890") > v("1.0.post9"));
        assert!(v("123456789012345678901234567890!1.0") > v("9!1.0"));
    }

    #[test]
    fn numbers_order_by_magnitude() {
        assert!(Number::from(9) < Number::from(10));
        assert!(Number::from_digits("0010") == Number::from(10));
        assert!(Number::from_digits("000").is_zero());
    }
}
