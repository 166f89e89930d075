//! Findings produced by a compatibility check.

use serde::Serialize;

/// Required versus actual interpreter `major.minor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeVersionCheck {
    pub required: String,
    pub actual: String,
}

impl RuntimeVersionCheck {
    pub fn new(required: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            required: required.into(),
            actual: actual.into(),
        }
    }

    pub fn is_mismatch(&self) -> bool {
        self.required != self.actual
    }
}

/// What kind of incompatibility a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    RuntimeVersionMismatch,
    PackageMissing,
    PackageVersionMismatch,
}

/// One detected incompatibility, with its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub package_name: Option<String>,
    pub installed_version: Option<String>,
    pub required_constraint: Option<String>,
    pub message: String,
}

impl Finding {
    pub fn runtime_mismatch(check: &RuntimeVersionCheck) -> Self {
        Self {
            kind: FindingKind::RuntimeVersionMismatch,
            package_name: None,
            installed_version: Some(check.actual.clone()),
            required_constraint: Some(check.required.clone()),
            message: format!(
                "**CRITICAL: Python major version {} is required, but you are using {}.**",
                check.required, check.actual
            ),
        }
    }

    pub fn package_missing(env: &str, name: &str, constraint: &str) -> Self {
        Self {
            kind: FindingKind::PackageMissing,
            package_name: Some(name.to_string()),
            installed_version: None,
            required_constraint: Some(constraint.to_string()),
            message: format!("Package **{name}** not found in **{env}** environment."),
        }
    }

    pub fn version_mismatch(
        env: &str,
        name: &str,
        installed: &str,
        constraint: &str,
        requirement: &str,
    ) -> Self {
        Self {
            kind: FindingKind::PackageVersionMismatch,
            package_name: Some(name.to_string()),
            installed_version: Some(installed.to_string()),
            required_constraint: Some(constraint.to_string()),
            message: format!(
                "Package **{name} {installed}** in **{env}** environment is *not compatible* with **{requirement}**."
            ),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.kind == FindingKind::RuntimeVersionMismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_check_compares_strings() {
        assert!(!RuntimeVersionCheck::new("3.11", "3.11").is_mismatch());
        assert!(RuntimeVersionCheck::new("3.9", "3.11").is_mismatch());
    }

    #[test]
    fn runtime_mismatch_message_is_critical() {
        let finding = Finding::runtime_mismatch(&RuntimeVersionCheck::new("3.9", "3.11"));
        assert!(finding.is_critical());
        assert_eq!(
            finding.message,
            "**CRITICAL: Python major version 3.9 is required, but you are using 3.11.**"
        );
    }

    #[test]
    fn missing_message_names_env() {
        let finding = Finding::package_missing("ml-prod", "numpy", "");
        assert_eq!(
            finding.message,
            "Package **numpy** not found in **ml-prod** environment."
        );
        assert!(finding.installed_version.is_none());
    }

    #[test]
    fn mismatch_message_quotes_requirement() {
        let finding =
            Finding::version_mismatch("base", "requests", "1.9.0", ">=2.0", "requests>=2.0");
        assert_eq!(
            finding.message,
            "Package **requests 1.9.0** in **base** environment is *not compatible* with **requests>=2.0**."
        );
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&FindingKind::PackageMissing).unwrap();
        assert_eq!(json, "\"package_missing\"");
    }
}
