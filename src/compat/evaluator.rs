//! Compatibility evaluation.
//!
//! Pure computation over already-collected data: no I/O, no retries.
//! Findings are ordered with the runtime check first, then packages in
//! manifest order.

use serde::Serialize;

use super::finding::{Finding, RuntimeVersionCheck};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::requirements::Requirement;

/// Outcome for one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Satisfied,
    Missing,
    Mismatch,
}

/// One row of the report: a requirement and what was found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageCheck {
    pub name: String,
    pub requirement: String,
    pub constraint: String,
    pub installed: Option<String>,
    pub status: CheckStatus,
}

/// Full result of evaluating one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    pub environment: String,
    pub runtime: RuntimeVersionCheck,
    pub packages: Vec<PackageCheck>,
}

impl CompatibilityReport {
    /// Findings in report order: runtime first, then manifest order.
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        if self.runtime.is_mismatch() {
            findings.push(Finding::runtime_mismatch(&self.runtime));
        }

        for check in &self.packages {
            match (check.status, &check.installed) {
                (CheckStatus::Satisfied, _) => {}
                (CheckStatus::Missing, _) | (CheckStatus::Mismatch, None) => {
                    findings.push(Finding::package_missing(
                        &self.environment,
                        &check.name,
                        &check.constraint,
                    ));
                }
                (CheckStatus::Mismatch, Some(installed)) => {
                    findings.push(Finding::version_mismatch(
                        &self.environment,
                        &check.name,
                        installed,
                        &check.constraint,
                        &check.requirement,
                    ));
                }
            }
        }

        findings
    }

    pub fn is_compatible(&self) -> bool {
        !self.runtime.is_mismatch()
            && self
                .packages
                .iter()
                .all(|check| check.status == CheckStatus::Satisfied)
    }
}

/// Evaluate requirements against an environment's inventory.
pub fn evaluate(
    environment: &str,
    inventory: &Inventory,
    requirements: &[Requirement],
    required_runtime: &str,
) -> CompatibilityReport {
    let runtime = RuntimeVersionCheck::new(required_runtime, inventory.runtime_version());

    let packages = requirements
        .iter()
        .map(|req| {
            let installed = inventory.get(req.name());
            let status = match installed {
                None => CheckStatus::Missing,
                Some(version) if req.is_satisfied_by(version) => CheckStatus::Satisfied,
                Some(_) => CheckStatus::Mismatch,
            };
            tracing::debug!(
                "{} (installed {:?}, required '{}'): {:?}",
                req.name(),
                installed,
                req.specifier(),
                status
            );
            PackageCheck {
                name: req.name().to_string(),
                requirement: req.source().to_string(),
                constraint: req.specifier().to_string(),
                installed: installed.map(str::to_string),
                status,
            }
        })
        .collect();

    CompatibilityReport {
        environment: environment.to_string(),
        runtime,
        packages,
    }
}

/// Parse requirement lines and evaluate them, failing on the first bad line.
pub fn evaluate_lines(
    environment: &str,
    inventory: &Inventory,
    lines: &[&str],
    required_runtime: &str,
) -> Result<Vec<Finding>> {
    let requirements = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Requirement::parse(line))
        .collect::<Result<Vec<_>>>()?;
    Ok(evaluate(environment, inventory, &requirements, required_runtime).findings())
}
